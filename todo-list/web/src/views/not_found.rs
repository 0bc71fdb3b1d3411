use dioxus::prelude::*;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");

    rsx! {
        div { class: "centered",
            h1 { "404" }
            p { "Nothing lives at /{path}." }
            Link { to: "/", "Return to the start" }
        }
    }
}
