//! Registration page. Accounts are confirmed by email before the first login.

use api::SignupRequest;
use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

#[component]
pub fn Signup() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut form = use_signal(SignupRequest::default);
    let mut busy = use_signal(|| false);

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            let req = form();
            if let Some(field) = req.first_missing() {
                tracing::debug!("signup missing {field}");
                session.notifier.warning("Please fill in all fields");
                return;
            }
            busy.set(true);
            let result = session.api.signup(&req).await;
            busy.set(false);
            match result {
                Ok(_) => {
                    session.notifier.info(
                        "Please check your email and click the confirmation link to complete registration.",
                    );
                    form.set(SignupRequest::default());
                    nav.replace(Route::Login {});
                }
                Err(e) => {
                    tracing::error!("signup failed: {e}");
                    session.notifier.error(e.to_string());
                }
            }
        });
    };

    let current = form();

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: handle_signup,
                h1 { "Create an account" }

                label { r#for: "signup-name", "Full name" }
                input {
                    id: "signup-name",
                    value: current.full_name,
                    oninput: move |evt| form.write().full_name = evt.value(),
                }
                label { r#for: "signup-username", "Username" }
                input {
                    id: "signup-username",
                    value: current.username,
                    oninput: move |evt| form.write().username = evt.value(),
                }
                label { r#for: "signup-email", "Email" }
                input {
                    id: "signup-email",
                    r#type: "email",
                    value: current.email,
                    oninput: move |evt| form.write().email = evt.value(),
                }
                label { r#for: "signup-password", "Password" }
                input {
                    id: "signup-password",
                    r#type: "password",
                    value: current.password,
                    oninput: move |evt| form.write().password = evt.value(),
                }

                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: busy(),
                    "Sign up"
                }
                p {
                    class: "auth-switch",
                    "Already registered? "
                    Link { to: Route::Login {}, "Log in" }
                }
            }
        }
    }
}
