//! # Task repository — CRUD over the remote `tasks` table
//!
//! [`TaskRepository`] is the only way the application reads or writes tasks. It
//! scopes every call to the user of the current [`SessionStore`] session and goes
//! through the [`TaskTable`] trait, so the same logic runs against the hosted
//! backend (`api::SupabaseClient`) or the in-memory [`crate::MemoryBackend`].
//!
//! ## Contract
//!
//! | Method | Fails with |
//! |--------|-----------|
//! | [`list`](TaskRepository::list) | `AuthRequired`, `Remote` |
//! | [`create`](TaskRepository::create) | `Validation` (blank title, checked before anything else), `AuthRequired`, `Remote` |
//! | [`set_completed`](TaskRepository::set_completed) | `AuthRequired`, `Remote` |
//! | [`delete`](TaskRepository::delete) | `AuthRequired`, `Remote` |
//!
//! Each call reaches the backend at most once; nothing is retried. A successful
//! call returns a [`Confirmed`] change, which is the only input the
//! [`crate::TaskListViewModel`] accepts. A failed call returns no change, so the
//! view-model cannot get ahead of the backend.

use std::future::Future;

use crate::error::{RemoteError, TaskError};
use crate::models::{NewTask, Session, Task, TaskId, UserId};
use crate::session::SessionStore;

/// Async interface to the row-oriented `tasks` table.
///
/// Row visibility is decided by the backend's ownership policy; implementations
/// pass the caller's session along with every request.
pub trait TaskTable {
    /// All rows visible to `session`, newest first.
    fn select_all(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Task>, RemoteError>>;

    /// Insert one row and return it as stored.
    fn insert(
        &self,
        session: &Session,
        task: &NewTask,
    ) -> impl Future<Output = Result<Task, RemoteError>>;

    fn update_completed(
        &self,
        session: &Session,
        id: TaskId,
        completed: bool,
    ) -> impl Future<Output = Result<(), RemoteError>>;

    fn delete(
        &self,
        session: &Session,
        id: TaskId,
    ) -> impl Future<Output = Result<(), RemoteError>>;
}

/// A change the backend has accepted.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskChange {
    Listed(Vec<Task>),
    Created(Task),
    CompletionSet { id: TaskId, completed: bool },
    Deleted(TaskId),
}

/// A [`TaskChange`] confirmed by the backend for a specific user.
///
/// Only [`TaskRepository`] creates these.
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmed {
    pub(crate) owner: UserId,
    pub(crate) change: TaskChange,
}

impl Confirmed {
    pub(crate) fn new(owner: UserId, change: TaskChange) -> Self {
        Self { owner, change }
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn change(&self) -> &TaskChange {
        &self.change
    }
}

/// CRUD façade over a [`TaskTable`], scoped to the current session.
pub struct TaskRepository<T: TaskTable> {
    table: T,
    sessions: SessionStore,
}

impl<T: TaskTable> TaskRepository<T> {
    pub fn new(table: T, sessions: SessionStore) -> Self {
        Self { table, sessions }
    }

    fn session(&self) -> Result<Session, TaskError> {
        self.sessions.current().ok_or_else(|| {
            tracing::warn!("Task repository called without an active session");
            TaskError::AuthRequired
        })
    }

    /// Fetch every task of the current user, newest first.
    pub async fn list(&self) -> Result<Confirmed, TaskError> {
        let session = self.session()?;
        tracing::debug!(user = %session.user_id, "Listing tasks");
        let tasks = self.table.select_all(&session).await.map_err(|e| {
            tracing::error!("Failed to list tasks: {e}");
            e
        })?;
        Ok(Confirmed::new(session.user_id, TaskChange::Listed(tasks)))
    }

    /// Create a task from `title`. Blank titles never reach the backend.
    pub async fn create(&self, title: &str) -> Result<Confirmed, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::Validation("Task title cannot be empty".to_string()));
        }
        let session = self.session()?;
        let payload = NewTask::new(title, &session.user_id);
        let task = self.table.insert(&session, &payload).await.map_err(|e| {
            tracing::error!("Failed to create task: {e}");
            e
        })?;
        tracing::debug!(id = task.id, "Task created");
        Ok(Confirmed::new(session.user_id, TaskChange::Created(task)))
    }

    pub async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Confirmed, TaskError> {
        let session = self.session()?;
        self.table
            .update_completed(&session, id, completed)
            .await
            .map_err(|e| {
                tracing::error!(id, "Failed to update task: {e}");
                e
            })?;
        Ok(Confirmed::new(
            session.user_id,
            TaskChange::CompletionSet { id, completed },
        ))
    }

    pub async fn delete(&self, id: TaskId) -> Result<Confirmed, TaskError> {
        let session = self.session()?;
        self.table.delete(&session, id).await.map_err(|e| {
            tracing::error!(id, "Failed to delete task: {e}");
            e
        })?;
        Ok(Confirmed::new(session.user_id, TaskChange::Deleted(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;

    fn signed_in(user: &str) -> (MemoryBackend, TaskRepository<MemoryBackend>) {
        let backend = MemoryBackend::new();
        let sessions = SessionStore::new();
        sessions.connect(&backend);
        backend.sign_in(user);
        let repo = TaskRepository::new(backend.clone(), sessions);
        (backend, repo)
    }

    #[tokio::test]
    async fn test_blank_titles_are_rejected_before_any_remote_call() {
        let (backend, repo) = signed_in("alice");

        for title in ["", "   ", "\t\n"] {
            let err = repo.create(title).await.unwrap_err();
            assert!(matches!(err, TaskError::Validation(_)));
        }
        assert_eq!(backend.remote_calls(), 0);
        assert!(backend.rows().is_empty());
    }

    #[tokio::test]
    async fn test_validation_wins_over_missing_session() {
        let repo = TaskRepository::new(MemoryBackend::new(), SessionStore::new());
        assert!(matches!(
            repo.create(" ").await,
            Err(TaskError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_calls_without_session_need_auth() {
        let backend = MemoryBackend::new();
        let repo = TaskRepository::new(backend.clone(), SessionStore::new());

        assert_eq!(repo.list().await.unwrap_err(), TaskError::AuthRequired);
        assert_eq!(repo.create("Buy milk").await.unwrap_err(), TaskError::AuthRequired);
        assert_eq!(repo.set_completed(1, true).await.unwrap_err(), TaskError::AuthRequired);
        assert_eq!(repo.delete(1).await.unwrap_err(), TaskError::AuthRequired);
        assert_eq!(backend.remote_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_sends_trimmed_title_and_owner() {
        let (backend, repo) = signed_in("alice");

        let confirmed = repo.create("  Buy milk ").await.unwrap();
        let TaskChange::Created(task) = confirmed.change() else {
            panic!("expected a created task");
        };
        assert_eq!(task.title, "Buy milk");
        assert!(!task.is_completed);
        assert_eq!(task.user_id, UserId::new("alice"));
        assert_eq!(confirmed.owner(), &UserId::new("alice"));
        assert_eq!(backend.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_is_passed_through_verbatim() {
        let (backend, repo) = signed_in("alice");
        backend.fail_next("permission denied for table tasks");

        let err = repo.create("Buy milk").await.unwrap_err();
        assert_eq!(err.to_string(), "permission denied for table tasks");
        assert_eq!(backend.remote_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_session_user() {
        let (backend, repo) = signed_in("alice");
        backend.seed_task("alice", "mine", false);
        backend.seed_task("bob", "theirs", false);

        let confirmed = repo.list().await.unwrap();
        let TaskChange::Listed(tasks) = confirmed.change() else {
            panic!("expected a listing");
        };
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "mine");
    }

    #[tokio::test]
    async fn test_mutations_follow_the_current_session() {
        let (backend, repo) = signed_in("alice");
        let task = backend.seed_task("alice", "mine", false);

        backend.sign_out_now();
        assert_eq!(repo.set_completed(task.id, true).await.unwrap_err(), TaskError::AuthRequired);

        backend.sign_in("alice");
        let confirmed = repo.set_completed(task.id, true).await.unwrap();
        assert_eq!(
            confirmed.change(),
            &TaskChange::CompletionSet { id: task.id, completed: true }
        );
        assert!(backend.rows()[0].is_completed);

        let confirmed = repo.delete(task.id).await.unwrap();
        assert_eq!(confirmed.change(), &TaskChange::Deleted(task.id));
        assert!(backend.rows().is_empty());
    }
}
