//! The auth gate fed from a `SessionStore` over arbitrary event sequences.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Duration, Utc};
use proptest::prelude::*;
use store::{AuthEvent, AuthGate, GateTransition, MemoryBackend, Session, SessionStore, UserId};

fn session_for(user: &str, generation: u32) -> Session {
    Session {
        access_token: format!("access-{user}-{generation}"),
        refresh_token: format!("refresh-{user}-{generation}"),
        user_id: UserId::new(user),
        email: None,
        expires_at: Utc::now() + Duration::hours(1),
    }
}

fn arb_event() -> impl Strategy<Value = AuthEvent> {
    prop_oneof![
        Just(AuthEvent::InitialSession),
        Just(AuthEvent::SignedIn),
        Just(AuthEvent::SignedOut),
        Just(AuthEvent::TokenRefreshed),
        Just(AuthEvent::UserUpdated),
    ]
}

/// An event plus the session it carries: `None`, or one of a few users with a
/// token generation so that same-user refreshes show up too.
fn arb_step() -> impl Strategy<Value = (AuthEvent, Option<Session>)> {
    let user = prop::option::of((prop::sample::select(vec!["alice", "bob", "carol"]), 0u32..3));
    (arb_event(), user).prop_map(|(event, user)| {
        (event, user.map(|(name, generation)| session_for(name, generation)))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn gate_is_authenticated_iff_latest_event_carried_a_session(
        steps in prop::collection::vec(arb_step(), 0..40)
    ) {
        let backend = MemoryBackend::new();
        let sessions = SessionStore::new();
        sessions.connect(&backend);

        let gate = Rc::new(RefCell::new(AuthGate::new()));
        let transitions: Rc<RefCell<Vec<Option<GateTransition>>>> = Rc::default();
        let _sub = {
            let gate = Rc::clone(&gate);
            let transitions = Rc::clone(&transitions);
            sessions.subscribe(move |change| {
                let transition = gate.borrow_mut().observe(change.session.as_ref());
                transitions.borrow_mut().push(transition);
            })
        };

        let mut previous_user: Option<UserId> = None;
        for (event, session) in steps {
            let user = session.as_ref().map(|s| s.user_id.clone());
            backend.emit(event, session);

            prop_assert_eq!(gate.borrow().is_authenticated(), user.is_some());
            prop_assert_eq!(gate.borrow().user_id().cloned(), user.clone());

            let mut recorded = transitions.take();
            prop_assert_eq!(recorded.len(), 1);
            let transition = recorded.pop().flatten();

            // No transition exactly when neither the auth state nor the user changed.
            prop_assert_eq!(transition.is_none(), previous_user == user);
            match (&previous_user, &user, transition) {
                (None, Some(to), Some(t)) => {
                    prop_assert_eq!(t, GateTransition::Mounted(to.clone()));
                }
                (Some(_), None, Some(t)) => prop_assert_eq!(t, GateTransition::Unmounted),
                (Some(from), Some(to), Some(t)) => prop_assert_eq!(
                    t,
                    GateTransition::SwitchedUser { from: from.clone(), to: to.clone() }
                ),
                _ => {}
            }
            previous_user = user;
        }
    }
}
