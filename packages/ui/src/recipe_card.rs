use dioxus::prelude::*;
use store::schema::Tier;
use store::{Recipe, VoteType};

use api::FeedView;

use crate::browser::{copy_to_clipboard, page_origin, share_link};
use crate::details::{format_date, rating_stars, render_details, split_hashtags, TextSegment};
use crate::form::RecipeForm;
use crate::icons::{
    FaBookmark, FaEye, FaGlobe, FaLock, FaPenToSquare, FaShareNodes, FaThumbsDown, FaThumbsUp,
};
use crate::session::use_session;
use crate::state::Action;
use crate::{Avatar, Icon};

/// Description with `#tags` rendered as links into the hashtag feed.
#[component]
pub fn TaggedText(text: String) -> Element {
    let session = use_session();
    let segments = split_hashtags(&text).into_iter().map(|segment| match segment {
        TextSegment::Text(plain) => (false, plain),
        TextSegment::Tag(tag) => (true, tag),
    });

    rsx! {
        for (i, (is_tag, value)) in segments.enumerate() {
            if is_tag {
                a {
                    key: "{i}",
                    class: "hashtag",
                    href: "#",
                    onclick: {
                        let session = session.clone();
                        let tag = value.clone();
                        move |evt: Event<MouseData>| {
                            evt.prevent_default();
                            session.dispatch(Action::SelectView(FeedView::Hashtag(tag.clone())));
                        }
                    },
                    "#{value}"
                }
            } else {
                span { key: "{i}", "{value}" }
            }
        }
    }
}

/// One recipe in the feed. The basic/pro toggle re-renders from the record
/// held here.
#[component]
pub fn RecipeCard(recipe: Recipe) -> Element {
    let session = use_session();
    let mut tier = use_signal(|| Tier::Basic);
    let user_id = session.state.read().user_id().map(str::to_string);

    let (up, down) = recipe.vote_counts();
    let my_vote = user_id.as_deref().and_then(|id| recipe.vote_of(id));
    let owned = recipe.is_owned_by(user_id.as_deref());
    let author = recipe.profiles.clone().unwrap_or_default();
    let author_name = author
        .full_name
        .clone()
        .or_else(|| author.username.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown User".to_string());
    let date = recipe
        .created_at
        .as_deref()
        .or(recipe.date_created.as_deref())
        .and_then(format_date)
        .unwrap_or_default();
    let lines = render_details(&recipe, tier());

    let vote = {
        let session = session.clone();
        let recipe_id = recipe.id.clone();
        let recipe_name = recipe.recipe_name.clone();
        move |vote_type: VoteType| {
            let session = session.clone();
            let recipe_id = recipe_id.clone();
            let recipe_name = recipe_name.clone();
            spawn(async move {
                if !session.api.is_logged_in() {
                    session.notifier.warning("Please log in to vote");
                    return;
                }
                match session.api.cast_vote(&recipe_id, vote_type).await {
                    Ok(_) => {
                        session.record(format!("Voted {} on {recipe_name}", vote_type.as_str()));
                        session.dispatch(Action::RefreshFeed);
                    }
                    Err(e) => {
                        tracing::error!("vote on {recipe_id}: {e}");
                        session.notifier.error("Error voting on recipe");
                    }
                }
            });
        }
    };
    let vote_up = {
        let vote = vote.clone();
        move |_| vote(VoteType::Up)
    };
    let vote_down = move |_| vote(VoteType::Down);

    let save = {
        let session = session.clone();
        move |_| {
            if session.api.is_logged_in() {
                session.notifier.success("Recipe saved!");
            } else {
                session.notifier.warning("Please log in to save recipes");
            }
        }
    };

    let share = {
        let session = session.clone();
        let link = share_link(&page_origin(), &recipe.id);
        move |_| {
            let session = session.clone();
            let link = link.clone();
            spawn(async move {
                if copy_to_clipboard(&link).await {
                    session.notifier.success("Recipe link copied to clipboard!");
                } else {
                    session.notifier.error("Could not copy link");
                }
            });
        }
    };

    let edit = {
        let session = session.clone();
        let recipe_id = recipe.id.clone();
        move |_| {
            let session = session.clone();
            let recipe_id = recipe_id.clone();
            spawn(async move {
                match session.api.recipe(&recipe_id).await {
                    Ok(recipe) => session.dispatch(Action::OpenForm(RecipeForm::from_recipe(&recipe))),
                    Err(e) => {
                        tracing::error!("loading {recipe_id} for edit: {e}");
                        session.notifier.error("Error loading recipe");
                    }
                }
            });
        }
    };

    let show_author = {
        let session = session.clone();
        let author_id = recipe.user_id.clone();
        move |_| session.dispatch(Action::ShowUser(Some(author_id.clone())))
    };

    let show_details = {
        let session = session.clone();
        let recipe_id = recipe.id.clone();
        move |_| session.dispatch(Action::ShowRecipe(Some(recipe_id.clone())))
    };

    rsx! {
        article {
            class: "recipe-card",

            header {
                class: "recipe-card-header",
                div {
                    class: "recipe-author",
                    onclick: show_author,
                    Avatar {
                        avatar_url: author.avatar_url.clone(),
                        full_name: author.full_name.clone(),
                        username: author.username.clone(),
                    }
                    div {
                        span { class: "recipe-author-name", "{author_name}" }
                        span { class: "recipe-date", "{date}" }
                    }
                }
                span {
                    class: if recipe.is_public { "privacy-badge public" } else { "privacy-badge private" },
                    if recipe.is_public {
                        Icon { icon: FaGlobe, width: 12, height: 12 }
                        " Public"
                    } else {
                        Icon { icon: FaLock, width: 12, height: 12 }
                        " Private"
                    }
                }
            }

            h3 { class: "recipe-title", "{recipe.recipe_name}" }
            if let Some(rating) = recipe.rating {
                div { class: "recipe-rating", "{rating_stars(rating)}" }
            }
            p {
                class: "recipe-description",
                TaggedText { text: recipe.description.clone() }
            }

            div {
                class: "tier-toggle",
                button {
                    class: if tier() == Tier::Basic { "active" } else { "" },
                    onclick: move |_| tier.set(Tier::Basic),
                    "Basic"
                }
                button {
                    class: if tier() == Tier::Pro { "active" } else { "" },
                    onclick: move |_| tier.set(Tier::Pro),
                    "Pro"
                }
            }

            if !lines.is_empty() {
                dl {
                    class: "recipe-details",
                    for line in lines {
                        div {
                            key: "{line.label}",
                            class: "recipe-detail",
                            dt { "{line.label}:" }
                            dd { "{line.value}" }
                        }
                    }
                }
            }

            footer {
                class: "recipe-card-actions",
                button {
                    class: if my_vote == Some(VoteType::Up) { "vote voted" } else { "vote" },
                    title: "Upvote",
                    onclick: vote_up,
                    Icon { icon: FaThumbsUp, width: 14, height: 14 }
                    " {up}"
                }
                button {
                    class: if my_vote == Some(VoteType::Down) { "vote voted" } else { "vote" },
                    title: "Downvote",
                    onclick: vote_down,
                    Icon { icon: FaThumbsDown, width: 14, height: 14 }
                    " {down}"
                }
                button {
                    class: "action",
                    onclick: save,
                    Icon { icon: FaBookmark, width: 14, height: 14 }
                    " Save"
                }
                button {
                    class: "action",
                    onclick: share,
                    Icon { icon: FaShareNodes, width: 14, height: 14 }
                    " Share"
                }
                button {
                    class: "action",
                    onclick: show_details,
                    Icon { icon: FaEye, width: 14, height: 14 }
                    " Details"
                }
                if owned {
                    button {
                        class: "action",
                        onclick: edit,
                        Icon { icon: FaPenToSquare, width: 14, height: 14 }
                        " Edit"
                    }
                }
            }
        }
    }
}
