//! Auth gate state machine: which half of the application is mounted.

use crate::models::{Session, UserId};

/// What the gate currently renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    /// Only the sign-in view is mounted. Also covers "not resolved yet".
    #[default]
    Unauthenticated,
    /// The main application is mounted for this user.
    Authenticated(UserId),
}

/// A change of what the gate renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateTransition {
    /// Sign-in view replaced by the application.
    Mounted(UserId),
    /// Application replaced by the sign-in view.
    Unmounted,
    /// Application remounted for a different user.
    SwitchedUser { from: UserId, to: UserId },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthGate {
    state: GateState,
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, GateState::Authenticated(_))
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match &self.state {
            GateState::Authenticated(user) => Some(user),
            GateState::Unauthenticated => None,
        }
    }

    /// Feed the latest session. Returns the transition, or `None` if what is
    /// mounted stays the same (e.g. a token refresh for the same user).
    pub fn observe(&mut self, session: Option<&Session>) -> Option<GateTransition> {
        let next = match session {
            Some(session) => GateState::Authenticated(session.user_id.clone()),
            None => GateState::Unauthenticated,
        };
        let previous = std::mem::replace(&mut self.state, next.clone());

        match (previous, next) {
            (GateState::Unauthenticated, GateState::Unauthenticated) => None,
            (GateState::Unauthenticated, GateState::Authenticated(user)) => {
                Some(GateTransition::Mounted(user))
            }
            (GateState::Authenticated(_), GateState::Unauthenticated) => {
                Some(GateTransition::Unmounted)
            }
            (GateState::Authenticated(from), GateState::Authenticated(to)) => {
                if from == to {
                    None
                } else {
                    Some(GateTransition::SwitchedUser { from, to })
                }
            }
        }
    }
}
