use dioxus::prelude::*;
use todo_list_core::filter::{COMPLETED_KEY, OPEN_KEY};
use todo_list_core::{Status, TaskFilter};

/// Status, completion and text criteria for the visible task list
#[component]
pub fn FilterBar(filter: TaskFilter, on_change: EventHandler<TaskFilter>) -> Element {
    let status_value = filter.status_key();
    let completed_value = filter.completion_key();
    let search_value = filter.search.clone().unwrap_or_default();

    let on_status = {
        let filter = filter.clone();
        move |evt: FormEvent| {
            on_change.call(filter.clone().with_status_key(&evt.value()));
        }
    };
    let on_completed = {
        let filter = filter.clone();
        move |evt: FormEvent| {
            on_change.call(filter.clone().with_completion_key(&evt.value()));
        }
    };
    let on_search = {
        let filter = filter.clone();
        move |evt: FormEvent| {
            on_change.call(filter.clone().with_search(evt.value()));
        }
    };

    rsx! {
        div { class: "filter-bar",
            input {
                placeholder: "Search title or category",
                value: "{search_value}",
                oninput: on_search,
            }
            select { value: "{status_value}", onchange: on_status,
                option { value: "", "All statuses" }
                for status in Status::ALL {
                    option { value: "{status}", "{status}" }
                }
            }
            select { value: "{completed_value}", onchange: on_completed,
                option { value: "", "Any" }
                option { value: OPEN_KEY, "Open" }
                option { value: COMPLETED_KEY, "Completed" }
            }
            if !filter.is_empty() {
                button {
                    class: "secondary",
                    onclick: move |_| on_change.call(TaskFilter::default()),
                    "Clear"
                }
            }
        }
    }
}
