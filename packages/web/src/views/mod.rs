use dioxus::prelude::*;

use ui::icons::{FaCircleCheck, FaClock, FaDumbbell};
use ui::{FeedbackLink, GymView, Icon, Navbar, PomodoroView, TasksView};

use crate::Route;

/// Dock, routed view and feedback link.
#[component]
pub fn Shell() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Tasks {}, Icon { icon: FaCircleCheck, width: 24, height: 24 } }
            Link { to: Route::Pomodoro {}, Icon { icon: FaClock, width: 24, height: 24 } }
            Link { to: Route::Gym {}, Icon { icon: FaDumbbell, width: 24, height: 24 } }
        }
        main {
            class: "content",
            Outlet::<Route> {}
        }
        FeedbackLink {}
    }
}

#[component]
pub fn Tasks() -> Element {
    rsx! { TasksView {} }
}

#[component]
pub fn Pomodoro() -> Element {
    rsx! { PomodoroView {} }
}

#[component]
pub fn Gym() -> Element {
    rsx! { GymView {} }
}
