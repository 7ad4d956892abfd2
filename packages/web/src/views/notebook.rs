use dioxus::prelude::*;
use ui::views::NotebookView;
use ui::use_app_state;

use crate::Route;

/// The offline notebook. Works without an account.
#[component]
pub fn Notebook() -> Element {
    let signed_in = use_app_state().read().user.is_some();

    rsx! {
        NotebookView {
            nav: rsx! {
                if signed_in {
                    Link { class: "navbar-link", to: Route::Feed {}, "Feed" }
                } else {
                    Link { class: "navbar-link", to: Route::Login {}, "Login" }
                }
            },
        }
    }
}
