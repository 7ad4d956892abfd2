//! Session context: owns the app state signal, the API client and the
//! notifier, and runs the network [`Effect`]s the reducer asks for.

use std::time::Duration;

use api::{ApiClient, ApiError};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use store::ClientConfig;

use crate::client::{load_config, make_client, make_store, SharedStore};
use crate::notifications::{NotificationStack, Notifications, Notifier};
use crate::state::{Action, AppState, Effect};

/// Trending tags shown in the sidebar.
const TRENDING_TAG_LIMIT: u32 = 10;

const FEED_ERROR: &str = "Error loading recipes. Please try again.";

/// Everything an event handler needs, cheap to clone.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub state: Signal<AppState>,
    pub api: ApiClient,
    pub notifier: Notifier,
    pub config: ClientConfig,
    pub store: SharedStoreHandle,
}

/// [`SharedStore`] wrapper so the session can be compared by identity.
#[derive(Clone)]
pub struct SharedStoreHandle(pub SharedStore);

impl PartialEq for SharedStoreHandle {
    fn eq(&self, other: &Self) -> bool {
        std::sync::Arc::ptr_eq(&self.0, &other.0)
    }
}

pub fn use_session() -> Session {
    use_context::<Session>()
}

/// Shortcut for components that only read state.
pub fn use_app_state() -> Signal<AppState> {
    use_session().state
}

impl Session {
    /// Apply an action and run whatever it asks for.
    pub fn dispatch(&self, action: Action) {
        let mut state = self.state;
        let effect = state.write().apply(action);
        self.run(effect);
    }

    pub fn record(&self, message: impl Into<String>) {
        self.dispatch(Action::RecordActivity(message.into()));
    }

    // Effects run on the root scope so they outlive the dispatching component.
    fn run(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::FetchFeed(request) => {
                let session = self.clone();
                spawn_forever(async move {
                    let result = session.api.recipes(&request.query).await.map_err(|e| {
                        tracing::error!("loading {} page {}: {e}", request.query.view, request.query.page);
                        FEED_ERROR.to_string()
                    });
                    session.dispatch(Action::FeedLoaded {
                        generation: request.generation,
                        result,
                    });
                });
            }
            Effect::FetchTrendingTags { generation } => {
                let session = self.clone();
                let days = self.state.peek().feed.trending_days;
                spawn_forever(async move {
                    match session.api.trending_hashtags(days, TRENDING_TAG_LIMIT).await {
                        Ok(tags) => session.dispatch(Action::TrendingTagsLoaded { generation, tags }),
                        Err(e) => tracing::warn!("trending hashtags: {e}"),
                    }
                });
            }
            Effect::Search { generation, query } => {
                let session = self.clone();
                let limit = self.config.search.limit;
                spawn_forever(async move {
                    let (recipes, users) = futures::join!(
                        session.api.search_recipes(&query, limit),
                        session.api.search_users(&query, limit)
                    );
                    let recipes = recipes.unwrap_or_else(|e| {
                        tracing::warn!("recipe search failed: {e}");
                        Vec::new()
                    });
                    let users = users.unwrap_or_else(|e| {
                        tracing::warn!("user search failed: {e}");
                        Vec::new()
                    });
                    session.dispatch(Action::SearchLoaded {
                        generation,
                        recipes,
                        users,
                    });
                });
            }
        }
    }

    /// Log out on the server; the local session ends even if that fails.
    pub fn logout(&self) {
        let session = self.clone();
        spawn_forever(async move {
            if let Err(e) = session.api.logout().await {
                tracing::warn!("logout request failed: {e}");
            }
            session.dispatch(Action::LoggedOut);
            session.notifier.info("Logged out successfully");
        });
    }

    /// Report an API error from a handler.
    pub fn report(&self, context: &str, error: &ApiError) {
        tracing::error!("{context}: {error}");
        self.notifier.error(format!("{context}: {error}"));
    }
}

/// Provider that creates the session and resolves it on mount.
/// Wrap the router with this component.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let config = use_hook(load_config);
    let store = use_hook(make_store);
    let api = use_hook(|| make_client(&config, store.clone()));
    let state = use_signal(|| AppState::new(&config));
    let notifications = use_signal(|| {
        Notifications::new(Duration::from_secs(config.ui.notification_secs.into()))
    });
    use_context_provider(|| notifications);
    let notifier = Notifier::new(notifications);

    let session = use_context_provider(|| Session {
        state,
        api,
        notifier,
        config: config.clone(),
        store: SharedStoreHandle(store.clone()),
    });

    // Health check, then restore a saved token
    let _ = use_resource(move || {
        let session = session.clone();
        async move {
            match session.api.health().await {
                Ok(health) => {
                    tracing::info!("API healthy: {:?}", health.environment);
                    session.dispatch(Action::HealthChecked(true));
                }
                Err(e) => {
                    tracing::error!("health check failed: {e}");
                    session.dispatch(Action::HealthChecked(false));
                    session
                        .notifier
                        .error("Backend server is not available. Please try again later.");
                }
            }

            if !session.api.is_logged_in() {
                session.dispatch(Action::SessionResolved(None));
                return;
            }
            match session.api.profile().await {
                Ok(profile) => session.dispatch(Action::SessionResolved(Some(profile))),
                Err(e) => {
                    tracing::warn!("saved session rejected: {e}");
                    session.api.set_token(None);
                    session.dispatch(Action::SessionResolved(None));
                }
            }
        }
    });

    rsx! {
        {children}
        NotificationStack {}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| session.logout(),
            "{label}"
        }
    }
}
