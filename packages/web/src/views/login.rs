//! Login page with the resend-confirmation helper.

use api::{LoginRequest, Profile};
use dioxus::prelude::*;
use ui::{use_session, Action};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    // Already signed in
    let state = session.state;
    use_effect(move || {
        let state = state.read();
        if !state.loading && state.user.is_some() {
            nav.replace(Route::Feed {});
        }
    });

    let handle_login = {
        let session = session.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let session = session.clone();
            spawn(async move {
                let req = LoginRequest {
                    email: email().trim().to_string(),
                    password: password(),
                };
                if req.email.is_empty() || req.password.is_empty() {
                    session.notifier.warning("Please fill in all fields");
                    return;
                }
                busy.set(true);
                let result = session.api.login(&req).await;
                busy.set(false);
                match result {
                    Ok(response) => {
                        let profile = match session.api.profile().await {
                            Ok(profile) => profile,
                            Err(e) => {
                                tracing::warn!("profile after login: {e}");
                                response.user.map(Profile::from).unwrap_or_default()
                            }
                        };
                        session.dispatch(Action::LoggedIn(profile));
                        session.notifier.success("Welcome back!");
                        nav.replace(Route::Feed {});
                    }
                    Err(e) => {
                        tracing::error!("login failed: {e}");
                        session.notifier.error(e.to_string());
                    }
                }
            });
        }
    };

    let resend = {
        let session = session.clone();
        move |_| {
            let session = session.clone();
            let address = email().trim().to_string();
            spawn(async move {
                if address.is_empty() {
                    session.notifier.warning("Please enter your email address first");
                    return;
                }
                match session.api.resend_confirmation(&address).await {
                    Ok(_) => session
                        .notifier
                        .success("Confirmation email sent! Please check your inbox."),
                    Err(e) => session
                        .notifier
                        .error(format!("Error sending confirmation email: {e}")),
                }
            });
        }
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: handle_login,
                h1 { "What'sYourRecipe" }
                p { class: "auth-subtitle", "Log in to share and discover coffee recipes." }

                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    value: email(),
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    value: password(),
                    oninput: move |evt| password.set(evt.value()),
                }

                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Logging in..." } else { "Login" }
                }
                button {
                    class: "link-button",
                    r#type: "button",
                    onclick: resend,
                    "Resend confirmation email"
                }

                p {
                    class: "auth-switch",
                    "No account yet? "
                    Link { to: Route::Signup {}, "Sign up" }
                }
                p {
                    class: "auth-switch",
                    Link { to: Route::Notebook {}, "Use the offline notebook" }
                }
            }
        }
    }
}
