use dioxus::prelude::*;

use crate::icons::{FaComment, FaRightFromBracket};
use crate::{Icon, LogoutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

pub const FEEDBACK_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSf91h4E3Ds2sds8eMss9PvZoBzwodyRBE9bgukg9HETrUMU2g/viewform?usp=header";

/// Floating navigation dock. Platform packages pass their route links as
/// children; the sign-out button is always last.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "dock",
            {children}
            LogoutButton {
                class: "dock-item sign-out",
                Icon { icon: FaRightFromBracket, width: 24, height: 24 }
            }
        }
    }
}

#[component]
pub fn FeedbackLink() -> Element {
    rsx! {
        a {
            class: "feedback",
            href: FEEDBACK_URL,
            target: "_blank",
            rel: "noopener noreferrer",
            Icon { icon: FaComment, width: 20, height: 20 }
            span { "Give Feedback" }
        }
    }
}
