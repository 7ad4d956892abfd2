//! Transient notifications: success / error / warning / info messages that
//! close on click or after the configured timeout.

use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification notification--success",
            NotificationKind::Error => "notification notification--error",
            NotificationKind::Warning => "notification notification--warning",
            NotificationKind::Info => "notification notification--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// The visible notification stack, newest last.
#[derive(Clone, Debug, PartialEq)]
pub struct Notifications {
    entries: Vec<Notification>,
    next_id: u64,
    timeout: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl Notifications {
    pub fn new(timeout: Duration) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            timeout,
        }
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.entries.push(Notification {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id
    }

    /// Remove by id. Dismissing twice is harmless.
    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}

/// Handle for raising notifications from event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct Notifier(Signal<Notifications>);

impl Notifier {
    pub fn new(signal: Signal<Notifications>) -> Self {
        Self(signal)
    }

    pub fn signal(&self) -> Signal<Notifications> {
        self.0
    }

    /// Show a message and schedule its removal.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let mut signal = self.0;
        let message = message.into();
        match kind {
            NotificationKind::Error => tracing::warn!("{message}"),
            _ => tracing::debug!("{message}"),
        }
        let id = signal.write().push(kind, message);
        let timeout = signal.peek().timeout();
        spawn_forever(async move {
            crate::browser::sleep(timeout).await;
            signal.write().dismiss(id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Warning, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message);
    }

    pub fn dismiss(&self, id: u64) {
        let mut signal = self.0;
        signal.write().dismiss(id);
    }
}

pub fn use_notifier() -> Notifier {
    Notifier(use_context::<Signal<Notifications>>())
}

/// Renders the stack in the corner of the page.
#[component]
pub fn NotificationStack() -> Element {
    let notifier = use_notifier();
    let entries = notifier.signal().read().entries().to_vec();

    rsx! {
        div {
            class: "notification-stack",
            for entry in entries {
                div {
                    key: "{entry.id}",
                    class: entry.kind.class(),
                    span { class: "notification-message", "{entry.message}" }
                    button {
                        class: "notification-close",
                        onclick: move |_| notifier.dismiss(entry.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut stack = Notifications::new(Duration::from_secs(1));
        let a = stack.push(NotificationKind::Info, "one");
        let b = stack.push(NotificationKind::Error, "two");
        assert_ne!(a, b);
        assert_eq!(stack.entries().len(), 2);
        stack.dismiss(a);
        stack.dismiss(a);
        assert_eq!(stack.entries().len(), 1);
        assert_eq!(stack.entries()[0].message, "two");
        assert_eq!(stack.entries()[0].kind, NotificationKind::Error);
    }
}
