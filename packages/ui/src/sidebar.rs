use api::FeedView;
use dioxus::prelude::*;

use crate::feed::TRENDING_WINDOWS;
use crate::icons::{FaBookmark, FaFire, FaHashtag, FaHouse, FaUserGroup};
use crate::session::use_session;
use crate::state::Action;
use crate::Icon;

#[component]
fn NavIcon(view: FeedView) -> Element {
    match view {
        FeedView::Feed => rsx! { Icon { icon: FaHouse, width: 14, height: 14 } },
        FeedView::Following => rsx! { Icon { icon: FaUserGroup, width: 14, height: 14 } },
        FeedView::Saved => rsx! { Icon { icon: FaBookmark, width: 14, height: 14 } },
        FeedView::Trending => rsx! { Icon { icon: FaFire, width: 14, height: 14 } },
        FeedView::Hashtag(_) => rsx! { Icon { icon: FaHashtag, width: 14, height: 14 } },
    }
}

/// Feed navigation, trending window filter, trending hashtags and recent activity.
#[component]
pub fn Sidebar() -> Element {
    let session = use_session();
    let state = session.state.read().clone();

    rsx! {
        aside {
            class: "sidebar",

            nav {
                class: "sidebar-nav",
                for view in FeedView::NAV {
                    button {
                        key: "{view}",
                        class: if state.is_active(&view) { "nav-item active" } else { "nav-item" },
                        onclick: {
                            let session = session.clone();
                            let view = view.clone();
                            move |_| session.dispatch(Action::SelectView(view.clone()))
                        },
                        NavIcon { view: view.clone() }
                        span { "{view.label()}" }
                    }
                }
            }

            if state.trending_filter_visible() {
                div {
                    class: "sidebar-section trending-filter",
                    h3 { "Trending window" }
                    div {
                        class: "trending-windows",
                        for days in TRENDING_WINDOWS {
                            button {
                                key: "{days}",
                                class: if state.feed.trending_days == days { "chip active" } else { "chip" },
                                onclick: {
                                    let session = session.clone();
                                    move |_| session.dispatch(Action::SetTrendingDays(days))
                                },
                                if days == 1 { "24 hours" } else { "{days} days" }
                            }
                        }
                    }
                }
            }

            div {
                class: "sidebar-section",
                h3 { "Trending hashtags" }
                if state.trending_tags.is_empty() {
                    p { class: "sidebar-empty", "No trending hashtags yet" }
                }
                ul {
                    class: "tag-list",
                    for tag in state.trending_tags.clone() {
                        li {
                            key: "{tag.tag}",
                            class: if state.is_active(&FeedView::Hashtag(tag.tag.clone())) { "tag active" } else { "tag" },
                            onclick: {
                                let session = session.clone();
                                let name = tag.tag.clone();
                                move |_| session.dispatch(Action::SelectView(FeedView::Hashtag(name.clone())))
                            },
                            span { "#{tag.tag}" }
                            span { class: "tag-count", "{tag.recent_count.unwrap_or(tag.usage_count)}" }
                        }
                    }
                }
            }

            div {
                class: "sidebar-section",
                h3 { "Recent activity" }
                if state.activity.is_empty() {
                    p { class: "sidebar-empty", "Nothing yet" }
                }
                ul {
                    class: "activity-list",
                    for (i, entry) in state.activity.iter().enumerate() {
                        li {
                            key: "{i}",
                            span { class: "activity-time", "{entry.timestamp}" }
                            span { "{entry.message}" }
                        }
                    }
                }
            }
        }
    }
}
