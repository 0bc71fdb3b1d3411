use dioxus::prelude::*;

/// Dismissable banner for a failed backend call
#[component]
pub fn ErrorMessage(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "error-message",
            p { "{message}" }
            button { class: "secondary", onclick: move |_| on_dismiss.call(()), "Dismiss" }
        }
    }
}
