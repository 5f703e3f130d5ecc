use dioxus::prelude::*;

use store::AuthService;

use crate::icons::{FaEnvelope, FaWandMagicSparkles};
use crate::Icon;
use crate::{notify, use_auth, use_notifications, Level};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Passwordless sign-in: asks the backend to email a magic link.
#[component]
pub fn SignIn() -> Element {
    let auth = use_auth();
    let mut notifications = use_notifications();
    let mut email = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut sent = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = auth.client().cloned();
        async move {
            let address = email().trim().to_string();
            if address.is_empty() {
                return;
            }
            let Some(client) = client else {
                notify(&mut notifications, Level::Error, "Backend is not configured");
                return;
            };

            sending.set(true);
            match client.request_sign_in_link(&address).await {
                Ok(()) => sent.set(true),
                Err(e) => notify(&mut notifications, Level::Error, &e.message),
            }
            sending.set(false);
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div {
            class: "sign-in",
            div {
                class: "sign-in-card",
                div {
                    class: "sign-in-badge",
                    Icon { icon: FaWandMagicSparkles, width: 32, height: 32 }
                }
                h1 { "ZenFlow" }
                p { class: "muted", "Your focus sanctuary starts here." }

                form {
                    class: "sign-in-form",
                    onsubmit: handle_submit,
                    div {
                        class: "input-with-icon",
                        Icon { icon: FaEnvelope, width: 18, height: 18 }
                        input {
                            r#type: "email",
                            placeholder: "Your email address",
                            required: true,
                            value: "{email}",
                            oninput: move |e| email.set(e.value()),
                        }
                    }
                    button {
                        class: "primary wide",
                        r#type: "submit",
                        disabled: sending(),
                        if sending() {
                            "Sending Magic..."
                        } else {
                            "Get Magic Link"
                        }
                    }
                }

                if sent() {
                    div {
                        class: "sign-in-sent",
                        "✨ Check your inbox for the magic link!"
                    }
                }
            }
        }
    }
}
