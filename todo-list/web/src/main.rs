use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use todo_list_core::ClientConfig;

mod browser;
mod components;
mod views;

use views::{Entry, NotFound, Tasks};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Entry {},
    #[route("/tasks")]
    Tasks {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

static CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

/// Embedded defaults, overridable through `TODO__*` variables where the
/// platform has an environment.
fn load_config() -> ClientConfig {
    ClientConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default configuration: {e}");
        ClientConfig::default()
    })
}

#[component]
fn App() -> Element {
    use_context_provider(load_config);

    rsx! {
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}
