//! User-visible notices
//!
//! A notice is what the console shows after an action: a title, a
//! description and a severity. Delivery is fire-and-forget through the
//! `Notifier` trait.

use autopay_types::AutopayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    /// Failed action
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Info,
            timestamp: Utc::now(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Destructive,
            timestamp: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Destructive
    }
}

impl From<&AutopayError> for Notice {
    fn from(err: &AutopayError) -> Self {
        let description = match err {
            AutopayError::MissingFields { .. } => "Please fill in all required fields".to_string(),
            other => other.to_string(),
        };
        Notice::destructive(err.notice_title(), description)
    }
}

/// Sink for notices
pub trait Notifier: Send {
    fn notify(&mut self, notice: &Notice);
}

/// Bounded most-recent-first history of notices
#[derive(Debug, Clone)]
pub struct NoticeLog {
    entries: Vec<Notice>,
    capacity: usize,
}

impl NoticeLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Newest notice, if any
    pub fn latest(&self) -> Option<&Notice> {
        self.entries.first()
    }

    /// All notices, newest first
    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::with_capacity(100)
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: &Notice) {
        self.entries.insert(0, notice.clone());
        // Keep bounded
        self.entries.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_log_is_bounded_and_newest_first() {
        let mut log = NoticeLog::with_capacity(2);
        log.notify(&Notice::info("one", ""));
        log.notify(&Notice::info("two", ""));
        log.notify(&Notice::info("three", ""));
        let titles: Vec<_> = log.entries().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["three", "two"]);
        assert_eq!(log.latest().map(|n| n.title.as_str()), Some("three"));
    }

    #[test]
    fn test_error_notice_titles() {
        let notice = Notice::from(&AutopayError::MissingFields { fields: vec!["name"] });
        assert_eq!(notice.title, "Validation Error");
        assert_eq!(notice.description, "Please fill in all required fields");
        assert!(notice.is_error());

        let notice = Notice::from(&AutopayError::SameSenderRecipient);
        assert_eq!(notice.title, "Invalid Configuration");
        assert_eq!(notice.description, "Sender and recipient agents must be different");
    }
}
