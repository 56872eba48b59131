use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// Seconds a status message stays visible
pub const STATUS_TTL_SECS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub set_at: DateTime<Utc>,
}

impl StatusMessage {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.set_at >= Duration::seconds(STATUS_TTL_SECS)
    }
}

/// Latest status message; a new message replaces the previous one
#[derive(Debug, Default)]
pub struct StatusBoard {
    current: Mutex<Option<StatusMessage>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, text: impl Into<String>) {
        self.set_at(text, false, Utc::now());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.set_at(text, true, Utc::now());
    }

    pub fn set_at(&self, text: impl Into<String>, is_error: bool, at: DateTime<Utc>) {
        let message = StatusMessage {
            text: text.into(),
            is_error,
            set_at: at,
        };
        if is_error {
            log::warn!("Status: {}", message.text);
        } else {
            log::info!("Status: {}", message.text);
        }
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(message);
    }

    pub fn current(&self) -> Option<StatusMessage> {
        self.current_at(Utc::now())
    }

    /// Visible message at `now`; expired messages are cleared
    pub fn current_at(&self, now: DateTime<Utc>) -> Option<StatusMessage> {
        let mut slot = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|message| message.is_expired_at(now)) {
            *slot = None;
        }
        slot.clone()
    }
}
