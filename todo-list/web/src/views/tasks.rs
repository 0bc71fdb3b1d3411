use crate::browser::{LocalStorageStore, RouterNavigator, WindowConfirm};
use crate::components::{ErrorMessage, FilterBar, Header, LoadingSpinner, TaskCard};
use dioxus::prelude::*;
use todo_list_core::{
    ClientConfig, HttpTaskClient, SessionContext, TaskClient, TaskField, TaskFilter, TaskId,
    TaskListController,
};

/// The task list screen.
///
/// The controller lives in a signal and is only borrowed around each network
/// call; the calls themselves run on spawned futures.
#[component]
pub fn Tasks() -> Element {
    let config = use_context::<ClientConfig>();
    let session = use_hook(|| SessionContext::load(&LocalStorageStore, &config.storage));
    let client = use_signal(|| HttpTaskClient::for_session(&config, session.as_ref()));
    let mut controller = use_signal(TaskListController::new);
    let mut filter = use_signal(TaskFilter::default);
    let nav = navigator();

    use_effect(move || {
        let client = client.peek().clone();
        let session = session.clone();
        spawn(async move {
            let request = controller.write().begin_initialize(session);
            let result = client.list_tasks().await;
            controller.write().complete_fetch(request, result);
        });
    });

    use_drop(move || {
        if let Ok(mut controller) = controller.try_write() {
            controller.teardown();
        }
    });

    let mut handle_add = move || {
        let Some(request) = controller.write().begin_add() else {
            return;
        };
        let client = client();
        spawn(async move {
            let result = client.create_task(&request.draft).await;
            controller.write().complete_add(request, result);
        });
    };

    let handle_edit = move |(id, field, raw): (TaskId, TaskField, String)| {
        let Some(request) = controller.write().begin_update(id, field.as_str(), &raw) else {
            return;
        };
        let client = client();
        spawn(async move {
            let result = client.update_task(&request.task).await;
            controller.write().complete_update(request, result);
        });
    };

    let handle_delete = move |id: Option<TaskId>| {
        let Some(request) = controller.write().begin_delete(id, &WindowConfirm) else {
            return;
        };
        let client = client();
        spawn(async move {
            let result = client.delete_task(request.id).await;
            controller.write().complete_delete(request, result);
        });
    };

    let handle_logout = move |_| {
        controller
            .write()
            .logout(&LocalStorageStore, &config.storage, &RouterNavigator(nav));
    };

    let state = controller.read();
    let current_filter = filter();
    let visible: Vec<_> = state
        .visible_tasks(&current_filter)
        .into_iter()
        .cloned()
        .map(|task| {
            let edit_states = task
                .id
                .map(|id| {
                    TaskField::ALL
                        .into_iter()
                        .filter_map(|field| state.edit_state(id, field).map(|s| (field, s)))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            (task, edit_states)
        })
        .collect();
    let total = state.tasks().len();
    let user = state.logged_in_user().to_string();
    let new_task = state.new_task().to_string();
    let loading = state.is_loading();
    let last_error = state.last_error().map(|e| e.to_string());
    drop(state);

    rsx! {
        Header { user, on_logout: handle_logout }
        main {
            div { class: "new-task",
                input {
                    placeholder: "What needs doing?",
                    value: "{new_task}",
                    oninput: move |evt| controller.write().set_new_task(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            handle_add();
                        }
                    },
                }
                button { onclick: move |_| handle_add(), "Add" }
            }
            FilterBar { filter: current_filter, on_change: move |next| filter.set(next) }
            if let Some(message) = last_error {
                ErrorMessage { message, on_dismiss: move |_| controller.write().clear_error() }
            }
            if loading {
                LoadingSpinner { message: "Loading tasks...".to_string() }
            } else if total == 0 {
                p { class: "loading", "No tasks yet." }
            } else if visible.is_empty() {
                p { class: "loading", "No tasks match the filter." }
            } else {
                for (task, edit_states) in visible {
                    TaskCard {
                        key: "{task.id:?}",
                        task,
                        edit_states,
                        on_edit: handle_edit,
                        on_delete: handle_delete,
                    }
                }
            }
        }
    }
}
