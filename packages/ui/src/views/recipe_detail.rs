use dioxus::prelude::*;
use store::schema::Tier;

use crate::browser::markdown_to_html;
use crate::details::{format_date, rating_stars, render_details};
use crate::recipe_card::TaggedText;
use crate::session::use_session;
use crate::views::ModalOverlay;

/// Full recipe panel: every pro detail line plus rendered brewing notes.
/// Callers key it by `recipe_id` so a new id mounts a fresh loader.
#[component]
pub fn RecipeDetailView(recipe_id: String, on_close: EventHandler<()>) -> Element {
    let session = use_session();

    let recipe = use_resource(move || {
        let api = session.api.clone();
        let id = recipe_id.clone();
        async move {
            api.recipe(&id).await.map_err(|e| {
                tracing::error!("loading recipe {id}: {e}");
                "Error loading recipe".to_string()
            })
        }
    });

    let body = match &*recipe.read() {
        None => rsx! { p { class: "feed-loading", "Loading recipe..." } },
        Some(Err(message)) => rsx! { p { class: "feed-error", "{message}" } },
        Some(Ok(recipe)) => {
            let lines = render_details(recipe, Tier::Pro);
            let author = recipe
                .profiles
                .as_ref()
                .and_then(|p| p.full_name.clone().or_else(|| p.username.clone()))
                .unwrap_or_else(|| "Unknown User".to_string());
            let date = recipe
                .created_at
                .as_deref()
                .or(recipe.date_created.as_deref())
                .and_then(format_date)
                .unwrap_or_default();
            let stars = recipe.rating.map(rating_stars);
            let notes = recipe
                .details
                .brewing_notes
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .map(markdown_to_html);

            rsx! {
                h2 { "{recipe.recipe_name}" }
                p { class: "recipe-date", "by {author} · {date}" }
                if let Some(stars) = stars {
                    div { class: "recipe-rating", "{stars}" }
                }
                p {
                    class: "recipe-description",
                    TaggedText { text: recipe.description.clone() }
                }
                dl {
                    class: "recipe-details recipe-details--full",
                    for line in lines {
                        div {
                            key: "{line.label}",
                            class: "recipe-detail",
                            dt { "{line.label}:" }
                            dd { "{line.value}" }
                        }
                    }
                }
                if let Some(html) = notes {
                    h3 { "Brewing notes" }
                    div { class: "brewing-notes", dangerous_inner_html: "{html}" }
                }
            }
        }
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            wide: true,
            div { class: "recipe-detail-panel", {body} }
        }
    }
}
