use std::time::Duration;

use crate::{ProductId, TimerToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load the product list; `None` is unfiltered.
    FetchProducts { query: Option<String> },
    /// Start the search timer, replacing any timer already running.
    ScheduleSearch { token: TimerToken, delay: Duration },
    CancelScheduledSearch,
    Scrape { url: String, force: bool },
    Refetch { id: ProductId },
    /// Re-read one stored product without re-scraping it.
    LoadProduct { id: ProductId },
    CheckHealth,
    /// Surface a one-shot message to the user.
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}
