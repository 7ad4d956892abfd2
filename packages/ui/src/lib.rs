//! This crate contains all shared UI for the workspace.
//!
//! ## Layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`state`] | [`AppState`] and its `apply(Action) -> Effect` reducer |
//! | [`feed`] | Feed pagination and stale-response filtering |
//! | [`form`] | Recipe dialog values and their mapping to records |
//! | [`details`] | Basic / pro detail lines and hashtag splitting |
//! | [`session`] | Context provider that runs effects against the API |
//! | [`notifications`] | Toast queue with auto-dismiss |
//! | [`browser`] | Clipboard, downloads, file picking, Markdown |
//! | [`client`] | Platform store, config and API client wiring |
//! | [`views`] | Page-level components |

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod browser;
pub mod client;
pub mod details;
pub mod feed;
pub mod form;
pub mod notifications;
pub mod session;
pub mod state;
pub mod views;

pub use notifications::{use_notifier, NotificationKind, Notifier};
pub use session::{use_app_state, use_session, LogoutButton, Session, SessionProvider};
pub use state::{Action, AppState};

mod avatar;
pub use avatar::Avatar;

mod search_box;
pub use search_box::SearchBox;

mod navbar;
pub use navbar::Navbar;

mod sidebar;
pub use sidebar::Sidebar;

mod recipe_card;
pub use recipe_card::{RecipeCard, TaggedText};

mod feed_panel;
pub use feed_panel::FeedPanel;

mod recipe_form;
pub use recipe_form::RecipeFormDialog;
