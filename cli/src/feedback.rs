//! Terminal implementations of the feedback seams: notifications go to
//! stdout, confirmations read stdin.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use service::feedback::{ConfirmationPrompt, Notification, NotificationClass, NotificationSink};

pub struct TerminalNotificationSink;

impl NotificationSink for TerminalNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.class {
            NotificationClass::Warning => println!("{}", notification.message.yellow()),
            NotificationClass::Info => println!("{}", notification.message),
        }
    }
}

/// Asks yes/no questions on the terminal. With `assume_yes` every prompt is
/// answered affirmatively without asking.
pub struct TerminalConfirmationPrompt {
    assume_yes: bool,
}

impl TerminalConfirmationPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl ConfirmationPrompt for TerminalConfirmationPrompt {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}
