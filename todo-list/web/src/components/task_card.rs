use dioxus::prelude::*;
use todo_list_core::{EditState, Status, Task, TaskField, TaskId};

/// One task with its inline-editable fields. Edits are committed on change.
#[component]
pub fn TaskCard(
    task: Task,
    edit_states: Vec<(TaskField, EditState)>,
    on_edit: EventHandler<(TaskId, TaskField, String)>,
    on_delete: EventHandler<Option<TaskId>>,
) -> Element {
    let id = task.id;
    let editable = id.is_some();
    let edit = move |field: TaskField| {
        move |evt: FormEvent| {
            if let Some(id) = id {
                on_edit.call((id, field, evt.value()));
            }
        }
    };
    let field_class = |field: TaskField| {
        match edit_states.iter().find(|(edited, _)| *edited == field) {
            Some((_, EditState::Pending)) => "field pending",
            Some((_, EditState::Failed(_))) => "field failed",
            _ => "field",
        }
    };

    let status_class = if task.status == Status::Done {
        "badge done"
    } else {
        "badge"
    };
    let category = task.category_label();
    let due_date = task
        .due_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let estimate = task
        .estimate
        .as_ref()
        .map(|estimate| estimate.value.to_string())
        .unwrap_or_default();
    let unit = task
        .estimate
        .as_ref()
        .and_then(|estimate| estimate.unit.clone())
        .unwrap_or_default();
    let importance = task.importance.clone().unwrap_or_default();

    rsx! {
        div { class: "task-card",
            div { class: field_class(TaskField::Title),
                input {
                    class: "title",
                    disabled: !editable,
                    value: "{task.title}",
                    onchange: edit(TaskField::Title),
                }
            }
            div {
                span { class: status_class, "{task.status}" }
                if task.completed {
                    span { class: "badge done", "Completed" }
                }
            }
            div { class: "fields",
                div { class: field_class(TaskField::Category),
                    input {
                        disabled: !editable,
                        value: "{category}",
                        onchange: edit(TaskField::Category),
                    }
                }
                div { class: field_class(TaskField::DueDate),
                    input {
                        r#type: "date",
                        disabled: !editable,
                        value: "{due_date}",
                        onchange: edit(TaskField::DueDate),
                    }
                }
                div { class: field_class(TaskField::EstimateValue),
                    input {
                        r#type: "number",
                        step: "0.5",
                        placeholder: "Estimate",
                        disabled: !editable,
                        value: "{estimate}",
                        onchange: edit(TaskField::EstimateValue),
                    }
                    if !unit.is_empty() {
                        span { " {unit}" }
                    }
                }
                div { class: field_class(TaskField::Importance),
                    input {
                        placeholder: "Importance",
                        disabled: !editable,
                        value: "{importance}",
                        onchange: edit(TaskField::Importance),
                    }
                }
            }
            button {
                class: "danger",
                disabled: !editable,
                onclick: move |_| on_delete.call(id),
                "Delete"
            }
        }
    }
}
