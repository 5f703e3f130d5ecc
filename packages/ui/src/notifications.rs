//! Notification centre: every success and failure the user should see.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub level: Level,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Notifications {
    next_id: u64,
    pub entries: Vec<Notice>,
}

impl Notifications {
    pub fn push(&mut self, level: Level, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.entries.push(Notice {
            id: self.next_id,
            timestamp: current_time(),
            level,
            message: message.into(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

pub fn notify(notifications: &mut Signal<Notifications>, level: Level, message: &str) {
    match level {
        Level::Error => tracing::error!("{message}"),
        Level::Warning => tracing::warn!("{message}"),
        Level::Info | Level::Success => tracing::info!("{message}"),
    }
    notifications.write().push(level, message);
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

const NOTIFICATIONS_CSS: Asset = asset!("/assets/styling/notifications.css");

/// Stack of dismissible notices, newest on top.
#[component]
pub fn NotificationCenter() -> Element {
    let mut notifications = use_notifications();
    let entries = notifications().entries.clone();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        document::Stylesheet { href: NOTIFICATIONS_CSS }

        div {
            class: "notification-center",
            if entries.len() > 1 {
                button {
                    class: "notification-clear",
                    onclick: move |_| notifications.write().entries.clear(),
                    "Dismiss all"
                }
            }
            for entry in entries.into_iter().rev() {
                div {
                    key: "{entry.id}",
                    class: match entry.level {
                        Level::Error => "notification error",
                        Level::Warning => "notification warning",
                        Level::Success => "notification success",
                        Level::Info => "notification info",
                    },
                    span { class: "notification-time", "{entry.timestamp}" }
                    span { class: "notification-message", "{entry.message}" }
                    button {
                        class: "notification-dismiss",
                        title: "Dismiss",
                        onclick: move |_| notifications.write().dismiss(entry.id),
                        "✕"
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
    fn test_dismiss_removes_only_that_notice() {
        let mut n = Notifications::default();
        let a = n.push(Level::Error, "Could not delete: permission denied");
        let b = n.push(Level::Success, "Task added");
        assert_ne!(a, b);

        n.dismiss(a);
        assert_eq!(n.entries.len(), 1);
        assert_eq!(n.entries[0].message, "Task added");

        // Unknown ids are ignored.
        n.dismiss(a);
        assert_eq!(n.entries.len(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_notice_is_stamped_with_local_time() {
        let before = chrono::Local::now().format("%H:%M:%S").to_string();
        let mut n = Notifications::default();
        n.push(Level::Info, "Task added");
        let after = chrono::Local::now().format("%H:%M:%S").to_string();

        let stamp = &n.entries[0].timestamp;
        assert!(stamp == &before || stamp == &after, "{stamp} not in [{before}, {after}]");
    }
}
