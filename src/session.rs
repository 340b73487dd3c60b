//! Signed-in user identity
//!
//! Only decides which affordances the views show; playback never depends
//! on it.

use chrono::{DateTime, Local, Utc};

#[derive(Clone, Debug)]
pub struct UserIdentity {
    pub name: String,
    pub host: String,
    pub signed_in_at: DateTime<Utc>,
    pub can_edit: bool,
}

impl UserIdentity {
    pub fn label(&self) -> String {
        format!("{}@{}", self.name, self.host)
    }

    pub fn signed_in_label(&self) -> String {
        self.signed_in_at
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Option<UserIdentity>,
}

impl Session {
    /// Sign in as `name`, falling back to the OS user
    pub fn sign_in(name: Option<String>) -> Self {
        let name = name
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .unwrap_or_else(|| "guest".to_string());
        let host = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        let can_edit = name != "guest";

        tracing::info!(user = %name, host = %host, can_edit, "Session started");
        Self {
            user: Some(UserIdentity {
                name,
                host,
                signed_in_at: Utc::now(),
                can_edit,
            }),
        }
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn can_edit(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.can_edit)
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.name, "Session ended");
        }
    }
}
