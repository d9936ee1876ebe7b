pub mod constants;
pub mod input;
pub mod layout;
pub mod render;

use std::collections::VecDeque;
use std::time::Instant;

use product_core::Notification;

use self::constants::TOAST_LIFETIME;
use self::input::Focus;

/// Presentation-only state that never reaches the core.
#[derive(Debug, Default)]
pub struct UiState {
    pub focus: Focus,
    /// The notification currently on screen.
    pub toast: Option<Toast>,
    /// Notifications waiting for the current toast to expire, oldest first.
    queued: VecDeque<Notification>,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

impl UiState {
    pub fn show(&mut self, notification: Notification) {
        self.show_at(notification, Instant::now());
    }

    /// Each notification gets its own full lifetime on screen, in arrival order.
    pub fn show_at(&mut self, notification: Notification, now: Instant) {
        if self.toast.is_some() {
            self.queued.push_back(notification);
            return;
        }
        self.toast = Some(Toast {
            notification,
            shown_at: now,
        });
    }

    #[cfg(test)]
    pub fn queued_toasts(&self) -> usize {
        self.queued.len()
    }

    /// Retire an expired toast and promote the next queued one. Returns true
    /// if the screen changed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        let expired = self
            .toast
            .as_ref()
            .is_some_and(|toast| now.duration_since(toast.shown_at) >= TOAST_LIFETIME);
        if expired {
            self.toast = self.queued.pop_front().map(|notification| Toast {
                notification,
                shown_at: now,
            });
        }
        expired
    }
}
