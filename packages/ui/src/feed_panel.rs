use dioxus::prelude::*;

use crate::feed::FeedStatus;
use crate::session::use_session;
use crate::state::Action;
use crate::RecipeCard;

/// The recipe list of the selected view with its "Load more" button.
#[component]
pub fn FeedPanel() -> Element {
    let session = use_session();
    let feed = session.state.read().feed.clone();
    let (empty_title, empty_hint) = feed.empty_message();
    let load_more = {
        let session = session.clone();
        move |_| session.dispatch(Action::LoadMore)
    };

    rsx! {
        section {
            class: "feed",
            h2 { class: "feed-title", "{feed.view.label()}" }

            {match &feed.status {
                FeedStatus::Error(message) => rsx! {
                    div { class: "feed-error", "{message}" }
                },
                FeedStatus::Loading if feed.recipes.is_empty() => rsx! {
                    div { class: "feed-loading", "Loading recipes..." }
                },
                FeedStatus::Loaded if feed.recipes.is_empty() => rsx! {
                    div {
                        class: "feed-empty",
                        h3 { "{empty_title}" }
                        p { "{empty_hint}" }
                    }
                },
                _ => rsx! {
                    div {
                        class: "feed-list",
                        for recipe in feed.recipes.clone() {
                            RecipeCard { key: "{recipe.id}", recipe: recipe.clone() }
                        }
                    }
                    if feed.has_more {
                        button {
                            class: "load-more",
                            disabled: feed.is_loading(),
                            onclick: load_more,
                            if feed.is_loading() { "Loading..." } else { "Load more" }
                        }
                    }
                },
            }}
        }
    }
}
