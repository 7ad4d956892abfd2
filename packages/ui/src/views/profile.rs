use dioxus::prelude::*;

use crate::details::format_date;
use crate::session::use_session;
use crate::views::ModalOverlay;
use crate::Avatar;

/// Another user's profile with a follow/unfollow toggle. Callers key it by
/// `user_id` so switching users starts from a clean follow state.
#[component]
pub fn UserProfileView(user_id: String, on_close: EventHandler<()>) -> Element {
    let session = use_session();
    let mut following = use_signal(|| None::<bool>);
    let mut busy = use_signal(|| false);

    let profile = use_resource({
        let api = session.api.clone();
        let user_id = user_id.clone();
        move || {
            let api = api.clone();
            let id = user_id.clone();
            async move {
                api.user(&id).await.map_err(|e| {
                    tracing::error!("loading user {id}: {e}");
                    "Error loading profile".to_string()
                })
            }
        }
    });

    let is_self = session.state.read().user_id() == Some(user_id.as_str());

    let toggle_follow = {
        let session = session.clone();
        let user_id = user_id.clone();
        move |_| {
            let session = session.clone();
            let id = user_id.clone();
            spawn(async move {
                if !session.api.is_logged_in() {
                    session.notifier.warning("Please log in to follow users");
                    return;
                }
                busy.set(true);
                match session.api.toggle_follow(&id).await {
                    Ok(response) => {
                        following.set(Some(response.following));
                        let message = response.message.unwrap_or_else(|| {
                            if response.following { "Now following" } else { "Unfollowed" }.to_string()
                        });
                        session.record(message.clone());
                        session.notifier.success(message);
                    }
                    Err(e) => session.report("Error updating follow", &e),
                }
                busy.set(false);
            });
        }
    };

    let body = match &*profile.read() {
        None => rsx! { p { class: "feed-loading", "Loading profile..." } },
        Some(Err(message)) => rsx! { p { class: "feed-error", "{message}" } },
        Some(Ok(user)) => {
            let joined = user.created_at.as_deref().and_then(format_date);
            let label = match following() {
                Some(true) => "Unfollow",
                _ => "Follow",
            };
            rsx! {
                div {
                    class: "profile-header",
                    Avatar {
                        avatar_url: user.avatar_url.clone(),
                        full_name: user.full_name.clone(),
                        username: user.username.clone(),
                        class: "avatar avatar--large",
                    }
                    div {
                        h2 { "{user.display_name()}" }
                        if let Some(username) = &user.username {
                            p { class: "profile-username", "@{username}" }
                        }
                        if let Some(joined) = joined {
                            p { class: "recipe-date", "Joined {joined}" }
                        }
                    }
                }
                if let Some(bio) = &user.bio {
                    p { class: "profile-bio", "{bio}" }
                }
                if !is_self {
                    button {
                        class: "primary",
                        disabled: busy(),
                        onclick: toggle_follow,
                        "{label}"
                    }
                }
            }
        }
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div { class: "profile-panel", {body} }
        }
    }
}
