use dioxus::prelude::*;
use ui::views::HomeView;
use ui::use_app_state;

use crate::Route;

/// The social feed. Signed-out visitors are sent to the login page once the
/// saved session has been checked.
#[component]
pub fn Feed() -> Element {
    let state = use_app_state();
    let nav = use_navigator();

    use_effect(move || {
        let state = state.read();
        if !state.loading && state.user.is_none() {
            nav.replace(Route::Login {});
        }
    });

    if state.read().loading {
        return rsx! {
            div { class: "page-loading", "Loading..." }
        };
    }

    rsx! {
        HomeView {
            nav: rsx! {
                Link { class: "navbar-link", to: Route::Notebook {}, "Notebook" }
            },
        }
    }
}
