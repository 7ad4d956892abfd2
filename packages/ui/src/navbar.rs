use dioxus::prelude::*;

use crate::form::RecipeForm;
use crate::icons::{FaMugHot, FaPlus};
use crate::session::{use_session, LogoutButton};
use crate::state::Action;
use crate::{Avatar, Icon, SearchBox};

const UI_CSS: Asset = asset!("/assets/ui.css");

/// Top bar: brand, search, create button and the signed-in user.
/// `children` render at the right edge (e.g. a link to the notebook).
#[component]
pub fn Navbar(children: Element) -> Element {
    let session = use_session();
    let user = session.state.read().user.clone();

    let open_form = {
        let session = session.clone();
        move |_| session.dispatch(Action::OpenForm(RecipeForm::default()))
    };

    rsx! {
        document::Link { rel: "stylesheet", href: UI_CSS }
        header {
            class: "navbar",
            div {
                class: "navbar-brand",
                Icon { icon: FaMugHot, width: 20, height: 20 }
                span { "What'sYourRecipe" }
            }

            SearchBox {}

            div {
                class: "navbar-actions",
                {children}
                if let Some(user) = user {
                    button {
                        class: "primary",
                        onclick: open_form,
                        Icon { icon: FaPlus, width: 12, height: 12 }
                        " Create Recipe"
                    }
                    div {
                        class: "navbar-user",
                        Avatar {
                            avatar_url: user.avatar_url.clone(),
                            full_name: user.full_name.clone(),
                            username: user.username.clone(),
                        }
                        span { class: "navbar-user-name", "{user.display_name()}" }
                    }
                    LogoutButton { class: "secondary" }
                }
            }
        }
    }
}
