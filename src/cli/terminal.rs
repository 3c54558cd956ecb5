//! Terminal implementations of the navigation and notification seams.

use std::io::{self, Write};

use tracing::info;
use url::Url;

use delta::{Navigator, Notification, NotificationLevel, Notifier, Route};

/// Logs in-client transitions and asks the user to open external pages.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!(%route, "navigated");
    }

    fn open_external(&self, url: &Url) {
        let _ignored = writeln!(io::stderr().lock(), "{}", external_prompt(url));
    }
}

/// Prints notifications to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let _ignored = writeln!(io::stderr().lock(), "{}", notification_line(&notification));
    }
}

fn external_prompt(url: &Url) -> String {
    format!("Open {url} in your browser to continue")
}

fn notification_line(notification: &Notification) -> String {
    let marker = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
    };
    format!("[{marker}] {}", notification.message)
}
