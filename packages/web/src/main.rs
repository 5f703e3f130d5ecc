use dioxus::prelude::*;

use ui::{AuthGate, AuthProvider, MusicProvider, NotificationCenter};
use views::{Gym, Pomodoro, Shell, Tasks};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Tasks {},
        #[route("/pomodoro")]
        Pomodoro {},
        #[route("/gym")]
        Gym {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    tracing::info!("Starting ZenFlow");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            NotificationCenter {}
            AuthGate {
                MusicProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}
