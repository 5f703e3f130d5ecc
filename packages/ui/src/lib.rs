//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;
pub use views::{GymView, PomodoroView, SignIn, TasksView};

mod audio;
mod platform;

mod navbar;
pub use navbar::{FeedbackLink, Navbar, FEEDBACK_URL};

mod auth;
pub use auth::{use_auth, Auth, AuthGate, AuthProvider, LogoutButton};

mod music;
pub use music::{use_now_playing, MusicEmbed, MusicProvider, NowPlaying};

pub mod notifications;
pub use notifications::{notify, use_notifications, Level, NotificationCenter, Notifications};
