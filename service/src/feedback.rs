//! User feedback abstractions.
//!
//! Services report outcomes through [`NotificationSink`] and ask for
//! go-ahead through [`ConfirmationPrompt`] instead of talking to a concrete
//! frontend, so the flows can be tested without one. The terminal
//! implementations live in the cli crate.

use std::time::Duration;

/// How long the frontend should keep a transient message visible.
pub const BRIEF_DURATION: Duration = Duration::from_secs(2);
pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);
pub const PROLONGED_DURATION: Duration = Duration::from_secs(5);
pub const WARNING_DURATION: Duration = Duration::from_secs(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationClass {
    Info,
    Warning,
}

/// A transient user-facing message with a dismiss affordance.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub dismiss_label: String,
    pub duration: Duration,
    pub class: NotificationClass,
}

impl Notification {
    pub fn info(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            dismiss_label: "Close".to_string(),
            duration,
            class: NotificationClass::Info,
        }
    }

    pub fn warning(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            dismiss_label: "Close".to_string(),
            duration,
            class: NotificationClass::Warning,
        }
    }
}

/// Sink for transient user-facing messages. Implementations must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Yes/no question put to the user before a destructive action.
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every notification for later assertions.
    #[derive(Clone, Default)]
    pub struct MockNotificationSink {
        notifications: Arc<Mutex<Vec<Notification>>>,
    }

    impl MockNotificationSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn notifications(&self) -> Vec<Notification> {
            self.notifications.lock().unwrap().clone()
        }

        pub fn last(&self) -> Option<Notification> {
            self.notifications.lock().unwrap().last().cloned()
        }

        pub fn count(&self) -> usize {
            self.notifications.lock().unwrap().len()
        }

        pub fn clear(&self) {
            self.notifications.lock().unwrap().clear();
        }
    }

    impl NotificationSink for MockNotificationSink {
        fn notify(&self, notification: Notification) {
            self.notifications.lock().unwrap().push(notification);
        }
    }

    /// Answers every confirmation with a scripted value and records the
    /// prompt texts.
    #[derive(Clone)]
    pub struct MockConfirmationPrompt {
        answer: Arc<Mutex<bool>>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl MockConfirmationPrompt {
        pub fn accepting() -> Self {
            Self {
                answer: Arc::new(Mutex::new(true)),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn declining() -> Self {
            let prompt = Self::accepting();
            prompt.set_answer(false);
            prompt
        }

        pub fn set_answer(&self, answer: bool) {
            *self.answer.lock().unwrap() = answer;
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        pub fn prompt_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    impl ConfirmationPrompt for MockConfirmationPrompt {
        fn confirm(&self, message: &str) -> bool {
            self.prompts.lock().unwrap().push(message.to_string());
            *self.answer.lock().unwrap()
        }
    }
}
