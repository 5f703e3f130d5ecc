use std::rc::Rc;

use api::SupabaseClient;
use dioxus::prelude::*;
use store::{Pending, Task, TaskError, TaskId, TaskListViewModel, TaskRepository, UserId};

use crate::icons::{FaCircle, FaCircleCheck, FaPlus, FaTrashCan};
use crate::Icon;
use crate::{notify, use_auth, use_notifications, Level, Notifications};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

type Repo = Rc<TaskRepository<SupabaseClient>>;

fn report(notifications: &mut Signal<Notifications>, context: Option<&str>, err: &TaskError) {
    let level = match err {
        TaskError::Validation(_) => Level::Warning,
        TaskError::AuthRequired | TaskError::Remote(_) => Level::Error,
    };
    let message = match context {
        Some(context) => format!("{context}: {err}"),
        None => err.to_string(),
    };
    notify(notifications, level, &message);
}

/// Empty the input once `submitted` is saved, unless it was edited meanwhile.
fn clear_submitted(input: &mut String, submitted: &str) {
    if input == submitted {
        input.clear();
    }
}

/// The signed-in user's task list with a progress bar.
///
/// Every change is sent to the backend first; the list only changes once the
/// backend has confirmed it.
#[component]
pub fn TasksView() -> Element {
    let auth = use_auth();
    let mut notifications = use_notifications();
    let owner = use_hook(|| auth.sessions().user_id().unwrap_or_else(|| UserId::new("")));
    let repo: Option<Repo> = use_hook(|| {
        auth.client()
            .cloned()
            .map(|client| Rc::new(TaskRepository::new(client, auth.sessions().clone())))
    });
    let mut model = use_signal(|| TaskListViewModel::new(owner.clone()));
    let mut new_title = use_signal(String::new);

    let loader = repo.clone();
    use_future(move || {
        let repo = loader.clone();
        async move {
            let Some(repo) = repo else {
                return;
            };
            match repo.list().await {
                Ok(confirmed) => {
                    model.write().apply(confirmed);
                }
                Err(e) => report(&mut notifications, Some("Could not load tasks"), &e),
            }
        }
    });

    let submitter = repo.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let repo = submitter.clone();
        async move {
            let Some(repo) = repo else {
                return;
            };
            if !model.write().begin(Pending::Submit) {
                return;
            }
            let submitted = new_title();
            match repo.create(&submitted).await {
                Ok(confirmed) => {
                    model.write().apply(confirmed);
                    clear_submitted(&mut new_title.write(), &submitted);
                }
                // Blank input is simply ignored, like an empty form.
                Err(TaskError::Validation(_)) => {}
                Err(e) => report(&mut notifications, None, &e),
            }
            model.write().finish(Pending::Submit);
        }
    };

    let toggler = repo.clone();
    let toggle = move |id: TaskId, completed: bool| {
        let Some(repo) = toggler.clone() else {
            return;
        };
        spawn(async move {
            if !model.write().begin(Pending::Task(id)) {
                return;
            }
            match repo.set_completed(id, completed).await {
                Ok(confirmed) => {
                    model.write().apply(confirmed);
                }
                Err(e) => report(&mut notifications, Some("Could not update task"), &e),
            }
            model.write().finish(Pending::Task(id));
        });
    };

    let deleter = repo.clone();
    let delete = move |id: TaskId| {
        let Some(repo) = deleter.clone() else {
            return;
        };
        spawn(async move {
            if !model.write().begin(Pending::Task(id)) {
                return;
            }
            match repo.delete(id).await {
                Ok(confirmed) => {
                    model.write().apply(confirmed);
                }
                Err(e) => report(&mut notifications, Some("Could not delete"), &e),
            }
            model.write().finish(Pending::Task(id));
        });
    };

    let view = model.read();
    let tasks = view.tasks().to_vec();
    let summary = view.summary();
    let percent = view.progress_percent();
    let submitting = view.is_busy(Pending::Submit);
    let busy: Vec<bool> = tasks.iter().map(|t| view.is_busy(Pending::Task(t.id))).collect();
    drop(view);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div {
            class: "tasks-view",
            header {
                h1 { "Daily Tasks" }
                p { class: "muted", "{summary}" }
                div {
                    class: "progress",
                    div {
                        class: "progress-fill",
                        style: "width: {percent:.1}%",
                    }
                }
            }

            form {
                class: "task-form",
                onsubmit: handle_submit,
                input {
                    r#type: "text",
                    placeholder: "What needs to be done?",
                    value: "{new_title}",
                    oninput: move |e| new_title.set(e.value()),
                }
                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: submitting,
                    title: "Add task",
                    Icon { icon: FaPlus, width: 18, height: 18 }
                }
            }

            div {
                class: "task-list",
                for (task, busy) in tasks.into_iter().zip(busy) {
                    TaskRow {
                        key: "{task.id}",
                        id: task.id,
                        task: task.clone(),
                        busy,
                        on_toggle: {
                            let toggle = toggle.clone();
                            move |completed| toggle(task.id, completed)
                        },
                        on_delete: {
                            let delete = delete.clone();
                            move |_| delete(task.id)
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn TaskRow(
    id: TaskId,
    task: Task,
    busy: bool,
    on_toggle: EventHandler<bool>,
    on_delete: EventHandler<()>,
) -> Element {
    let completed = task.is_completed;

    rsx! {
        div {
            class: if busy { "task-row busy" } else { "task-row" },
            "data-task-id": "{id}",
            button {
                class: "task-check",
                disabled: busy,
                title: if completed { "Mark as not done" } else { "Mark as done" },
                onclick: move |_| on_toggle.call(!completed),
                if completed {
                    Icon { icon: FaCircleCheck, width: 22, height: 22, class: "done" }
                } else {
                    Icon { icon: FaCircle, width: 22, height: 22, class: "open" }
                }
            }
            span {
                class: if completed { "task-title completed" } else { "task-title" },
                "{task.title}"
            }
            button {
                class: "task-delete",
                disabled: busy,
                "aria-label": "Delete task",
                onclick: move |_| on_delete.call(()),
                Icon { icon: FaTrashCan, width: 16, height: 16 }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_title_is_cleared() {
        let mut input = "Buy milk".to_string();
        clear_submitted(&mut input, "Buy milk");
        assert!(input.is_empty());
    }

    #[test]
    fn test_text_typed_while_saving_is_kept() {
        let mut input = "Buy milk and eggs".to_string();
        clear_submitted(&mut input, "Buy milk");
        assert_eq!(input, "Buy milk and eggs");
    }
}
