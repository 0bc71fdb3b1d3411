use crate::Route;
use crate::browser::LocalStorageStore;
use anyhow::Context;
use dioxus::prelude::*;
use todo_list_core::{ClientConfig, SessionContext};

/// Entry screen: starts a session for the given email and opens the task list.
///
/// Credentials are checked by the backend on each task request, not here.
#[component]
pub fn Entry() -> Element {
    let config = use_context::<ClientConfig>();
    let existing = use_hook(|| SessionContext::load(&LocalStorageStore, &config.storage));
    let nav = navigator();
    let mut email = use_signal(|| {
        existing
            .as_ref()
            .map(|session| session.email.clone())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| None::<String>);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let address = email().trim().to_string();
        if address.is_empty() {
            error.set(Some("Please enter your email".to_string()));
            return;
        }
        match start_session(&config, address) {
            Ok(session) => {
                tracing::info!("Logged in as {}", session.email);
                nav.push(Route::Tasks {});
            }
            Err(e) => error.set(Some(format!("{e:#}"))),
        }
    };

    rsx! {
        main { class: "centered",
            h1 { "To-do" }
            form { class: "new-task", onsubmit: handle_submit,
                input {
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                button { r#type: "submit", "Log in" }
            }
            if let Some(message) = error() {
                p { class: "error-message", "{message}" }
            }
            if let Some(session) = existing {
                Link { to: Route::Tasks {}, "Continue as {session.email}" }
            }
        }
    }
}

fn start_session(config: &ClientConfig, email: String) -> anyhow::Result<SessionContext> {
    SessionContext::begin(&LocalStorageStore, &config.storage, email, None)
        .context("Cannot save session")
}
