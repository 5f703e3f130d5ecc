//! # Task list view-model
//!
//! [`TaskListViewModel`] mirrors the tasks of one user as last confirmed by the
//! backend. It only changes through [`TaskListViewModel::apply`], which takes a
//! [`Confirmed`] change produced by [`crate::TaskRepository`] after the backend
//! accepted the operation.
//!
//! | Change | Effect |
//! |--------|--------|
//! | `Listed` | Replaces the whole list, in the order the backend returned it. |
//! | `Created` | Prepends the new task (it is the newest). |
//! | `CompletionSet` | Updates the flag in place; order is unchanged. |
//! | `Deleted` | Removes the entry; the rest keeps its order. |
//!
//! Changes confirmed for a different user than the view-model's owner are
//! dropped, so a response that lands after a sign-out / sign-in never leaks into
//! the next user's list.
//!
//! The view-model also tracks which controls have a request in flight so the
//! UI can disable them; there is no request de-duplication beyond that.

use std::collections::HashSet;

use crate::models::{Task, TaskId, UserId};
use crate::repo::{Confirmed, TaskChange};

/// A control that can have a request in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pending {
    /// The "add task" form.
    Submit,
    /// Toggle or delete of one task.
    Task(TaskId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskListViewModel {
    owner: UserId,
    tasks: Vec<Task>,
    loaded: bool,
    pending: HashSet<Pending>,
}

impl TaskListViewModel {
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            tasks: Vec::new(),
            loaded: false,
            pending: HashSet::new(),
        }
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether a listing has been applied at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Apply a backend-confirmed change. Returns `false` if it was discarded.
    pub fn apply(&mut self, confirmed: Confirmed) -> bool {
        if confirmed.owner != self.owner {
            tracing::warn!(
                owner = %self.owner,
                confirmed_for = %confirmed.owner,
                "Discarding task change confirmed for another user"
            );
            return false;
        }

        match confirmed.change {
            TaskChange::Listed(tasks) => {
                self.tasks = tasks;
                self.loaded = true;
            }
            TaskChange::Created(task) => self.tasks.insert(0, task),
            TaskChange::CompletionSet { id, completed } => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.is_completed = completed;
                }
            }
            TaskChange::Deleted(id) => self.tasks.retain(|t| t.id != id),
        }
        true
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }

    /// Completed share of all tasks, `0.0` for an empty list.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.completed_count() as f64 / total as f64
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_fraction() * 100.0
    }

    /// "2 of 4 tasks completed"
    pub fn summary(&self) -> String {
        format!("{} of {} tasks completed", self.completed_count(), self.total())
    }

    /// Mark `op` as in flight. Returns `false` if it already was.
    pub fn begin(&mut self, op: Pending) -> bool {
        self.pending.insert(op)
    }

    pub fn finish(&mut self, op: Pending) {
        self.pending.remove(&op);
    }

    pub fn is_busy(&self, op: Pending) -> bool {
        self.pending.contains(&op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use crate::repo::TaskRepository;
    use crate::session::SessionStore;
    use crate::TaskError;

    fn task(id: TaskId, owner: &str, completed: bool) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            is_completed: completed,
            user_id: UserId::new(owner),
            created_at: chrono::DateTime::from_timestamp(1_000 + id, 0).unwrap(),
        }
    }

    fn alice() -> UserId {
        UserId::new("alice")
    }

    fn listed(tasks: Vec<Task>) -> Confirmed {
        Confirmed::new(alice(), TaskChange::Listed(tasks))
    }

    fn ids(vm: &TaskListViewModel) -> Vec<TaskId> {
        vm.tasks().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_listing_keeps_backend_order() {
        let mut vm = TaskListViewModel::new(alice());
        assert!(!vm.is_loaded());

        // Deliberately not sorted by id: the backend's order is authoritative.
        vm.apply(listed(vec![task(3, "alice", false), task(1, "alice", false), task(2, "alice", false)]));
        assert_eq!(ids(&vm), vec![3, 1, 2]);
        assert!(vm.is_loaded());
    }

    #[test]
    fn test_created_task_is_prepended() {
        let mut vm = TaskListViewModel::new(alice());
        vm.apply(listed(vec![task(3, "alice", false), task(2, "alice", false), task(1, "alice", false)]));

        vm.apply(Confirmed::new(alice(), TaskChange::Created(task(42, "alice", false))));
        assert_eq!(ids(&vm), vec![42, 3, 2, 1]);
        assert_eq!(vm.total(), 4);
    }

    #[test]
    fn test_completion_updates_in_place() {
        let mut vm = TaskListViewModel::new(alice());
        vm.apply(listed(vec![task(3, "alice", false), task(2, "alice", false), task(1, "alice", false)]));

        vm.apply(Confirmed::new(alice(), TaskChange::CompletionSet { id: 2, completed: true }));
        assert_eq!(ids(&vm), vec![3, 2, 1]);
        assert!(vm.tasks()[1].is_completed);
        assert_eq!(vm.completed_count(), 1);
    }

    #[test]
    fn test_delete_keeps_remaining_order() {
        let mut vm = TaskListViewModel::new(alice());
        vm.apply(listed(vec![task(3, "alice", false), task(2, "alice", false), task(1, "alice", false)]));

        vm.apply(Confirmed::new(alice(), TaskChange::Deleted(2)));
        assert_eq!(ids(&vm), vec![3, 1]);
    }

    #[test]
    fn test_changes_for_another_user_are_discarded() {
        let mut vm = TaskListViewModel::new(alice());
        vm.apply(listed(vec![task(1, "alice", false)]));

        let applied = vm.apply(Confirmed::new(
            UserId::new("bob"),
            TaskChange::Listed(vec![task(9, "bob", false)]),
        ));
        assert!(!applied);
        assert_eq!(ids(&vm), vec![1]);
    }

    #[test]
    fn test_progress() {
        let mut vm = TaskListViewModel::new(alice());
        assert_eq!(vm.progress_fraction(), 0.0);
        assert_eq!(vm.summary(), "0 of 0 tasks completed");

        vm.apply(listed(vec![
            task(4, "alice", true),
            task(3, "alice", false),
            task(2, "alice", true),
            task(1, "alice", false),
        ]));
        assert_eq!(vm.progress_fraction(), 0.5);
        assert_eq!(vm.progress_percent(), 50.0);
        assert_eq!(vm.summary(), "2 of 4 tasks completed");
    }

    #[test]
    fn test_pending_flags() {
        let mut vm = TaskListViewModel::new(alice());
        assert!(vm.begin(Pending::Submit));
        assert!(!vm.begin(Pending::Submit));
        assert!(vm.is_busy(Pending::Submit));
        assert!(!vm.is_busy(Pending::Task(1)));
        vm.finish(Pending::Submit);
        assert!(!vm.is_busy(Pending::Submit));
    }

    async fn loaded(backend: &MemoryBackend) -> (TaskRepository<MemoryBackend>, TaskListViewModel) {
        let sessions = SessionStore::new();
        sessions.connect(backend);
        backend.sign_in("alice");
        let repo = TaskRepository::new(backend.clone(), sessions);
        let mut vm = TaskListViewModel::new(alice());
        vm.apply(repo.list().await.unwrap());
        (repo, vm)
    }

    #[tokio::test]
    async fn test_list_from_backend_renders_newest_first() {
        let backend = MemoryBackend::new();
        let t1 = backend.seed_task("alice", "T1", false);
        let t2 = backend.seed_task("alice", "T2", false);
        let t3 = backend.seed_task("alice", "T3", false);
        let (_repo, vm) = loaded(&backend).await;

        assert_eq!(ids(&vm), vec![t3.id, t2.id, t1.id]);
    }

    #[tokio::test]
    async fn test_create_success_prepends_and_counts_one_more() {
        let backend = MemoryBackend::new();
        backend.seed_task("alice", "older", false);
        let (repo, mut vm) = loaded(&backend).await;
        let before = vm.total();

        vm.apply(repo.create("Buy milk").await.unwrap());
        assert_eq!(vm.tasks()[0].title, "Buy milk");
        assert_eq!(vm.total(), before + 1);
    }

    #[tokio::test]
    async fn test_blank_create_leaves_view_model_untouched() {
        let backend = MemoryBackend::new();
        backend.seed_task("alice", "older", false);
        let (repo, mut vm) = loaded(&backend).await;
        let snapshot = vm.clone();
        let calls = backend.remote_calls();

        for title in ["", "   "] {
            if let Ok(confirmed) = repo.create(title).await {
                vm.apply(confirmed);
            }
        }
        assert_eq!(vm, snapshot);
        assert_eq!(backend.remote_calls(), calls);
    }

    #[tokio::test]
    async fn test_failed_toggle_leaves_entry_unchanged() {
        let backend = MemoryBackend::new();
        let task = backend.seed_task("alice", "stretch", false);
        let (repo, mut vm) = loaded(&backend).await;

        backend.fail_next("network error");
        let result = repo.set_completed(task.id, true).await;
        assert!(matches!(result, Err(TaskError::Remote(_))));
        if let Ok(confirmed) = result {
            vm.apply(confirmed);
        }
        assert!(!vm.tasks()[0].is_completed);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_task() {
        let backend = MemoryBackend::new();
        let task = backend.seed_task("alice", "stretch", false);
        let (repo, mut vm) = loaded(&backend).await;

        backend.fail_next("row-level security");
        if let Ok(confirmed) = repo.delete(task.id).await {
            vm.apply(confirmed);
        }
        assert_eq!(ids(&vm), vec![task.id]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let backend = MemoryBackend::new();
        backend.seed_task("alice", "kept", false);
        let (repo, mut vm) = loaded(&backend).await;

        backend.fail_next("timeout");
        if let Ok(confirmed) = repo.list().await {
            vm.apply(confirmed);
        }
        assert_eq!(vm.tasks()[0].title, "kept");
    }
}
