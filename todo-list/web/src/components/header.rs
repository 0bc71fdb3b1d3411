use dioxus::prelude::*;

/// Top bar showing who is logged in, with the logout action
#[component]
pub fn Header(user: String, on_logout: EventHandler<()>) -> Element {
    rsx! {
        header { class: "app-header",
            h1 { "Tasks" }
            div {
                if !user.is_empty() {
                    span { class: "user", "{user} " }
                }
                button { class: "secondary", onclick: move |_| on_logout.call(()), "Logout" }
            }
        }
    }
}
