//! Navbar search: recipes and users matching the query, side by side.

use dioxus::prelude::*;

use crate::icons::{FaMagnifyingGlass, FaXmark};
use crate::session::use_session;
use crate::state::Action;
use crate::{Avatar, Icon};

#[component]
pub fn SearchBox() -> Element {
    let session = use_session();
    let mut text = use_signal(String::new);
    let search = session.state.read().search.clone();

    let on_input = {
        let session = session.clone();
        move |evt: Event<FormData>| {
            let value = evt.value();
            text.set(value.clone());
            session.dispatch(Action::Search(value));
        }
    };

    let clear = {
        let session = session.clone();
        move |_| {
            text.set(String::new());
            session.dispatch(Action::ClearSearch);
        }
    };

    rsx! {
        div {
            class: "search-box",
            span { class: "search-icon", Icon { icon: FaMagnifyingGlass, width: 14, height: 14 } }
            input {
                class: "search-input",
                r#type: "search",
                placeholder: "Search recipes or people...",
                value: text(),
                oninput: on_input,
            }

            if search.is_open() {
                div {
                    class: "search-results",
                    div {
                        class: "search-results-header",
                        span { "Results for \"{search.query}\"" }
                        button {
                            class: "icon-button",
                            title: "Close",
                            onclick: clear,
                            Icon { icon: FaXmark, width: 12, height: 12 }
                        }
                    }

                    if search.loading {
                        p { class: "search-empty", "Searching..." }
                    } else if search.recipes.is_empty() && search.users.is_empty() {
                        p { class: "search-empty", "No results found" }
                    } else {
                        if !search.recipes.is_empty() {
                            h4 { "Recipes" }
                            for recipe in search.recipes.clone() {
                                div {
                                    key: "{recipe.id}",
                                    class: "search-result",
                                    onclick: {
                                        let session = session.clone();
                                        let id = recipe.id.clone();
                                        move |_| session.dispatch(Action::ShowRecipe(Some(id.clone())))
                                    },
                                    span { class: "search-result-title", "{recipe.recipe_name}" }
                                    span { class: "search-result-sub", "{recipe.description}" }
                                }
                            }
                        }
                        if !search.users.is_empty() {
                            h4 { "People" }
                            for user in search.users.clone() {
                                div {
                                    key: "{user.id}",
                                    class: "search-result",
                                    onclick: {
                                        let session = session.clone();
                                        let id = user.id.clone();
                                        move |_| session.dispatch(Action::ShowUser(Some(id.clone())))
                                    },
                                    Avatar {
                                        avatar_url: user.avatar_url.clone(),
                                        full_name: user.full_name.clone(),
                                        username: user.username.clone(),
                                        class: "avatar avatar--small",
                                    }
                                    span { class: "search-result-title", "{user.display_name()}" }
                                    if let Some(username) = &user.username {
                                        span { class: "search-result-sub", "@{username}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
