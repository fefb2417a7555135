//! User-facing notifications
//!
//! Transient status messages with a severity and a display duration.
//! The TUI shows them in its message box and dismisses them when the
//! duration elapses; the CLI prints them once.

use std::time::Duration;

use super::client::{PushReport, SyncError};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    /// Default display duration for this severity
    fn duration(self) -> Duration {
        match self {
            NoticeLevel::Info => Duration::from_millis(2500),
            NoticeLevel::Success => Duration::from_millis(2000),
            NoticeLevel::Error => Duration::from_millis(5000),
        }
    }
}

/// A transient status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub duration: Duration,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }

    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            duration: level.duration(),
        }
    }
}

/// Map a push outcome to its user notification
///
/// Application-level rejections carry the server's message; every
/// transport-category failure collapses to one "sync error" text.
pub fn push_outcome(result: &Result<PushReport, SyncError>) -> Notice {
    match result {
        Ok(report) => Notice::success(format!("Synced {} client(s) to remote", report.pushed)),
        Err(SyncError::Rejected(message)) => {
            Notice::error(format!("Sync rejected by server: {}", message))
        }
        Err(SyncError::InFlight) => Notice::info("Sync already in progress"),
        Err(err) => Notice::error(format!("Sync error: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_by_level() {
        assert_eq!(Notice::info("x").duration, Duration::from_millis(2500));
        assert_eq!(Notice::success("x").duration, Duration::from_millis(2000));
        assert_eq!(Notice::error("x").duration, Duration::from_millis(5000));
    }

    #[test]
    fn test_push_outcome_success() {
        let notice = push_outcome(&Ok(PushReport { pushed: 3 }));
        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(notice.text.contains("3"));
    }

    #[test]
    fn test_push_outcome_rejected_carries_server_message() {
        let notice = push_outcome(&Err(SyncError::Rejected("quota exceeded".to_string())));
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.contains("quota exceeded"));
    }

    #[test]
    fn test_push_outcome_transport_is_generic_error() {
        let notice = push_outcome(&Err(SyncError::Transport("connection refused".to_string())));
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.starts_with("Sync error"));
    }

    #[test]
    fn test_push_outcome_in_flight_is_informational() {
        let notice = push_outcome(&Err(SyncError::InFlight));
        assert_eq!(notice.level, NoticeLevel::Info);
    }
}
