//! Authentication context, gate and hooks for the UI.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use api::SupabaseClient;
use dioxus::prelude::*;
use store::{AuthService, Session, SessionStore, Subscription};

use crate::notifications::{notify, use_notifications, Level, Notifications};
use crate::platform::{current_href, replace_url, sleep};
use crate::views::SignIn;

/// How often the session is re-read, which also picks up sign-ins and
/// sign-outs from other tabs.
const SESSION_POLL: Duration = Duration::from_secs(30);

/// Shared authentication state, provided by [`AuthProvider`].
#[derive(Clone)]
pub struct Auth {
    client: Option<SupabaseClient>,
    config_error: Option<String>,
    sessions: SessionStore,
    session: Signal<Option<Session>>,
    _subscription: Rc<Subscription>,
}

impl Auth {
    /// The current session. Reading it subscribes the calling component.
    pub fn session(&self) -> Option<Session> {
        (self.session)()
    }

    /// `None` when the backend is not configured.
    pub fn client(&self) -> Option<&SupabaseClient> {
        self.client.as_ref()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Get the authentication context.
pub fn use_auth() -> Auth {
    use_context::<Auth>()
}

/// Provider component that owns the session store.
/// Wrap your app with this component to enable authentication.
///
/// On mount it finishes a pending magic-link sign-in (tokens in the URL),
/// publishes the initial session, then re-reads the session every 30 seconds.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut notifications = use_context_provider(|| Signal::new(Notifications::default()));
    let session = use_signal(|| None::<Session>);

    let auth = use_context_provider(move || {
        let (client, config_error) = match SupabaseClient::from_env() {
            Ok(client) => (Some(client), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let sessions = SessionStore::new();
        if let Some(client) = &client {
            sessions.connect(client);
        }
        let subscription = sessions.subscribe(move |change| {
            let mut session = session;
            session.set(change.session.clone());
        });
        Auth {
            client,
            config_error,
            sessions,
            session,
            _subscription: Rc::new(subscription),
        }
    });

    use_future(move || {
        let auth = auth.clone();
        async move {
            let Some(client) = auth.client.clone() else {
                let reason = auth.config_error.clone().unwrap_or_default();
                notify(
                    &mut notifications,
                    Level::Error,
                    &format!("Backend is not configured: {reason}"),
                );
                return;
            };

            if let Some(href) = current_href() {
                match client.complete_sign_in(&href).await {
                    Ok(Some(_)) => replace_url(&api::auth::strip_fragment(&href)),
                    Ok(None) => {}
                    Err(e) => {
                        replace_url(&api::auth::strip_fragment(&href));
                        notify(&mut notifications, Level::Error, &e.to_string());
                    }
                }
            }

            if let Err(e) = auth.sessions.initialize(&client).await {
                notify(
                    &mut notifications,
                    Level::Warning,
                    &format!("Could not restore session: {e}"),
                );
            }

            loop {
                sleep(SESSION_POLL).await;
                if let Err(e) = client.get_session().await {
                    tracing::warn!("Session check failed: {e}");
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Shows the sign-in view, or `children` once someone is signed in.
///
/// The children are keyed by user id, so switching users remounts the whole
/// app and drops every timer, audio handle and request of the previous user.
#[component]
pub fn AuthGate(children: Element) -> Element {
    let auth = use_auth();
    let gate = use_hook(|| Rc::new(RefCell::new(store::AuthGate::new())));

    let session = auth.session();
    if let Some(transition) = gate.borrow_mut().observe(session.as_ref()) {
        tracing::info!(?transition, "Auth gate changed");
    }
    let user = gate.borrow().user_id().cloned();

    match user {
        Some(user) => rsx! {
            for user in std::iter::once(user) {
                div {
                    key: "{user}",
                    class: "app-shell",
                    {children.clone()}
                }
            }
        },
        None => rsx! {
            SignIn {}
        },
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    children: Element,
) -> Element {
    let auth = use_auth();
    let mut notifications = use_notifications();

    let onclick = move |_| {
        let client = auth.client().cloned();
        async move {
            let Some(client) = client else {
                return;
            };
            if let Err(e) = client.sign_out().await {
                notify(
                    &mut notifications,
                    Level::Warning,
                    &format!("Signed out locally, but the server did not confirm: {e}"),
                );
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            title: "{label}",
            onclick: onclick,
            {children}
        }
    }
}
