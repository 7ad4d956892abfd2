use dioxus::prelude::*;
use store::models::initial_of;

/// Avatar image, or the user's initial when there is no image.
#[component]
pub fn Avatar(
    avatar_url: Option<String>,
    full_name: Option<String>,
    username: Option<String>,
    #[props(default = "avatar".to_string())] class: String,
) -> Element {
    match avatar_url.filter(|u| !u.is_empty()) {
        Some(url) => rsx! {
            img {
                class: "{class}",
                src: "{url}",
                alt: "Avatar",
            }
        },
        None => {
            let initial = initial_of(full_name.as_deref(), username.as_deref());
            rsx! {
                span {
                    class: "{class} avatar--initial",
                    "{initial}"
                }
            }
        }
    }
}
