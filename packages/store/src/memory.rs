use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use crate::error::RemoteError;
use crate::models::{AuthEvent, NewTask, Session, Task, TaskId, UserId};
use crate::observer::{Observers, Subscription};
use crate::repo::TaskTable;
use crate::session::{AuthService, SessionChange};

const EPOCH_SECS: i64 = 1_700_000_000;

/// In-memory auth service and `tasks` table for tests and local development.
///
/// Applies the same ownership rule as the hosted row-level policy: a session
/// only sees and mutates rows whose `user_id` equals its own.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Rc<RefCell<State>>,
    listeners: Observers<SessionChange>,
}

#[derive(Default)]
struct State {
    session: Option<Session>,
    tasks: Vec<Task>,
    next_id: TaskId,
    token_serial: u64,
    fail_next: Option<RemoteError>,
    remote_calls: usize,
    sent_links: Vec<String>,
}

impl State {
    /// Counts a remote call and returns the injected failure, if any.
    fn call(&mut self) -> Result<(), RemoteError> {
        self.remote_calls += 1;
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn issue_session(&mut self, user: UserId) -> Session {
        self.token_serial += 1;
        Session {
            access_token: format!("access-{}", self.token_serial),
            refresh_token: format!("refresh-{}", self.token_serial),
            email: Some(format!("{user}@example.com")),
            user_id: user,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    fn row_timestamp(id: TaskId) -> DateTime<Utc> {
        DateTime::from_timestamp(EPOCH_SECS + id, 0).unwrap_or_default()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign `user` in and emit [`AuthEvent::SignedIn`].
    pub fn sign_in(&self, user: &str) -> Session {
        let session = {
            let mut state = self.state.borrow_mut();
            let session = state.issue_session(UserId::new(user));
            state.session = Some(session.clone());
            session
        };
        self.emit(AuthEvent::SignedIn, Some(session.clone()));
        session
    }

    /// Rotate the current session's tokens and emit [`AuthEvent::TokenRefreshed`].
    pub fn refresh_session(&self) -> Option<Session> {
        let session = {
            let mut state = self.state.borrow_mut();
            let user = state.session.as_ref()?.user_id.clone();
            let session = state.issue_session(user);
            state.session = Some(session.clone());
            session
        };
        self.emit(AuthEvent::TokenRefreshed, Some(session.clone()));
        Some(session)
    }

    /// Drop the session (sign-out elsewhere or expiry) and emit [`AuthEvent::SignedOut`].
    pub fn sign_out_now(&self) {
        self.state.borrow_mut().session = None;
        self.emit(AuthEvent::SignedOut, None);
    }

    /// Emit an arbitrary change without touching the stored session.
    pub fn emit(&self, event: AuthEvent, session: Option<Session>) {
        self.listeners.emit(&SessionChange::new(event, session));
    }

    /// Insert a row directly, bypassing the policy. Returns the stored task.
    pub fn seed_task(&self, owner: &str, title: &str, is_completed: bool) -> Task {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let task = Task {
            id: state.next_id,
            title: title.to_string(),
            is_completed,
            user_id: UserId::new(owner),
            created_at: State::row_timestamp(state.next_id),
        };
        state.tasks.push(task.clone());
        task
    }

    /// Make the next remote call fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.state.borrow_mut().fail_next = Some(RemoteError::new(message));
    }

    pub fn remote_calls(&self) -> usize {
        self.state.borrow().remote_calls
    }

    pub fn sent_links(&self) -> Vec<String> {
        self.state.borrow().sent_links.clone()
    }

    pub fn session_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// All rows, regardless of owner.
    pub fn rows(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }
}

impl AuthService for MemoryBackend {
    async fn request_sign_in_link(&self, email: &str) -> Result<(), RemoteError> {
        let mut state = self.state.borrow_mut();
        state.call()?;
        if !email.contains('@') {
            return Err(RemoteError::with_status(422, "Unable to validate email address: invalid format"));
        }
        state.sent_links.push(email.to_string());
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Session>, RemoteError> {
        let mut state = self.state.borrow_mut();
        state.call()?;
        Ok(state.session.clone())
    }

    fn on_session_change(&self, handler: impl Fn(&SessionChange) + 'static) -> Subscription {
        self.listeners.subscribe(handler)
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        self.state.borrow_mut().call()?;
        self.sign_out_now();
        Ok(())
    }
}

impl TaskTable for MemoryBackend {
    async fn select_all(&self, session: &Session) -> Result<Vec<Task>, RemoteError> {
        let mut state = self.state.borrow_mut();
        state.call()?;
        let mut rows: Vec<Task> = state
            .tasks
            .iter()
            .filter(|t| t.user_id == session.user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn insert(&self, session: &Session, task: &NewTask) -> Result<Task, RemoteError> {
        let mut state = self.state.borrow_mut();
        state.call()?;
        if task.user_id != session.user_id {
            return Err(RemoteError::with_status(
                403,
                "new row violates row-level security policy for table \"tasks\"",
            ));
        }
        state.next_id += 1;
        let row = Task {
            id: state.next_id,
            title: task.title.clone(),
            is_completed: task.is_completed,
            user_id: task.user_id.clone(),
            created_at: State::row_timestamp(state.next_id),
        };
        state.tasks.push(row.clone());
        Ok(row)
    }

    async fn update_completed(
        &self,
        session: &Session,
        id: TaskId,
        completed: bool,
    ) -> Result<(), RemoteError> {
        let mut state = self.state.borrow_mut();
        state.call()?;
        // Rows hidden by the policy are silently unaffected, as with the hosted table.
        if let Some(row) = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == session.user_id)
        {
            row.is_completed = completed;
        }
        Ok(())
    }

    async fn delete(&self, session: &Session, id: TaskId) -> Result<(), RemoteError> {
        let mut state = self.state.borrow_mut();
        state.call()?;
        state
            .tasks
            .retain(|t| !(t.id == id && t.user_id == session.user_id));
        Ok(())
    }
}
