//! # Application state
//!
//! [`AppState`] is the single state container of the recipe client. Components
//! read it through a `Signal<AppState>` context and change it only by sending
//! an [`Action`] through [`AppState::apply`]. `apply` is synchronous and pure;
//! when an action needs network work it returns an [`Effect`] describing the
//! request, and the session layer runs it and feeds the result back as
//! another action.
//!
//! | Action | Effect |
//! |--------|--------|
//! | `SelectView`, `SetTrendingDays`, `RefreshFeed`, `LoggedIn` | [`Effect::FetchFeed`] for page 0 |
//! | `LoadMore` | [`Effect::FetchFeed`] for the next page, if there is one |
//! | `Search` | [`Effect::Search`] when the query is long enough |
//! | `LoggedOut` | none; clears every cached view |

use api::FeedView;
use store::{ClientConfig, Hashtag, Profile, Recipe};

use crate::feed::{FeedRequest, FeedState};
use crate::form::RecipeForm;

/// Entries kept in the sidebar activity list.
pub const ACTIVITY_LIMIT: usize = 10;

/// One line of the sidebar activity list.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub message: String,
}

/// Results panel of the navbar search box.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub generation: u64,
    pub loading: bool,
    pub recipes: Vec<Recipe>,
    pub users: Vec<Profile>,
}

impl SearchState {
    pub fn is_open(&self) -> bool {
        !self.query.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Startup session check finished; `None` means logged out.
    SessionResolved(Option<Profile>),
    HealthChecked(bool),
    LoggedIn(Profile),
    LoggedOut,
    SelectView(FeedView),
    SetTrendingDays(u32),
    LoadMore,
    RefreshFeed,
    FeedLoaded {
        generation: u64,
        result: Result<Vec<Recipe>, String>,
    },
    /// Tags fetched after the first page of feed `generation` loaded.
    TrendingTagsLoaded {
        generation: u64,
        tags: Vec<Hashtag>,
    },
    RecordActivity(String),
    Search(String),
    SearchLoaded {
        generation: u64,
        recipes: Vec<Recipe>,
        users: Vec<Profile>,
    },
    ClearSearch,
    OpenForm(RecipeForm),
    CloseForm,
    ShowRecipe(Option<String>),
    ShowUser(Option<String>),
}

/// Network work requested by an action.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    None,
    FetchFeed(FeedRequest),
    FetchTrendingTags { generation: u64 },
    Search { generation: u64, query: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub user: Option<Profile>,
    /// Startup session check still running.
    pub loading: bool,
    pub online: bool,
    pub feed: FeedState,
    pub trending_tags: Vec<Hashtag>,
    pub activity: Vec<ActivityEntry>,
    pub search: SearchState,
    /// The create/edit dialog, when open.
    pub form: Option<RecipeForm>,
    pub selected_recipe: Option<String>,
    pub selected_user: Option<String>,
    min_query_len: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            user: None,
            loading: true,
            online: false,
            feed: FeedState::new(config.feed.page_size, config.feed.trending_days),
            trending_tags: Vec::new(),
            activity: Vec::new(),
            search: SearchState::default(),
            form: None,
            selected_recipe: None,
            selected_user: None,
            min_query_len: config.search.min_query_len,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_active(&self, view: &FeedView) -> bool {
        &self.feed.view == view
    }

    /// The trending-window selector only shows in the trending view.
    pub fn trending_filter_visible(&self) -> bool {
        self.feed.view.is_trending()
    }

    fn clear_views(&mut self) {
        self.feed.view = FeedView::Feed;
        self.feed.reset();
        self.trending_tags.clear();
        self.activity.clear();
        self.search = SearchState::default();
        self.form = None;
        self.selected_recipe = None;
        self.selected_user = None;
    }

    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::SessionResolved(user) => {
                self.loading = false;
                match user {
                    Some(user) => self.apply(Action::LoggedIn(user)),
                    None => {
                        self.user = None;
                        Effect::None
                    }
                }
            }
            Action::HealthChecked(online) => {
                self.online = online;
                Effect::None
            }
            Action::LoggedIn(user) => {
                self.loading = false;
                self.user = Some(user);
                Effect::FetchFeed(self.feed.refresh())
            }
            Action::LoggedOut => {
                self.user = None;
                self.clear_views();
                Effect::None
            }
            Action::SelectView(view) => {
                self.selected_recipe = None;
                self.selected_user = None;
                Effect::FetchFeed(self.feed.select_view(view))
            }
            Action::SetTrendingDays(days) => Effect::FetchFeed(self.feed.set_trending_days(days)),
            Action::LoadMore => match self.feed.load_more() {
                Some(request) => Effect::FetchFeed(request),
                None => Effect::None,
            },
            Action::RefreshFeed => Effect::FetchFeed(self.feed.refresh()),
            Action::FeedLoaded { generation, result } => {
                let applied = self.feed.apply(generation, result);
                if applied && self.feed.page == 0 {
                    Effect::FetchTrendingTags { generation }
                } else {
                    Effect::None
                }
            }
            Action::TrendingTagsLoaded { generation, tags } => {
                if generation == self.feed.generation() {
                    self.trending_tags = tags;
                }
                Effect::None
            }
            Action::RecordActivity(message) => {
                self.activity.insert(
                    0,
                    ActivityEntry {
                        timestamp: crate::browser::clock_time(),
                        message,
                    },
                );
                self.activity.truncate(ACTIVITY_LIMIT);
                Effect::None
            }
            Action::Search(query) => {
                let query = query.trim().to_string();
                if query.chars().count() < self.min_query_len {
                    self.search = SearchState {
                        generation: self.search.generation + 1,
                        ..SearchState::default()
                    };
                    return Effect::None;
                }
                self.search.generation += 1;
                self.search.query = query.clone();
                self.search.loading = true;
                Effect::Search {
                    generation: self.search.generation,
                    query,
                }
            }
            Action::SearchLoaded {
                generation,
                recipes,
                users,
            } => {
                if generation == self.search.generation {
                    self.search.loading = false;
                    self.search.recipes = recipes;
                    self.search.users = users;
                }
                Effect::None
            }
            Action::ClearSearch => {
                self.search = SearchState {
                    generation: self.search.generation + 1,
                    ..SearchState::default()
                };
                Effect::None
            }
            Action::OpenForm(form) => {
                self.form = Some(form);
                Effect::None
            }
            Action::CloseForm => {
                self.form = None;
                Effect::None
            }
            Action::ShowRecipe(id) => {
                self.selected_recipe = id;
                Effect::None
            }
            Action::ShowUser(id) => {
                self.selected_user = id;
                Effect::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Profile {
        Profile {
            id: "u1".into(),
            username: Some("barista".into()),
            ..Default::default()
        }
    }

    fn recipes(n: usize) -> Vec<Recipe> {
        (0..n)
            .map(|i| Recipe {
                id: i.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn fetch(effect: Effect) -> FeedRequest {
        match effect {
            Effect::FetchFeed(request) => request,
            other => panic!("expected a feed fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_login_fetches_first_page() {
        let mut state = AppState::default();
        let request = fetch(state.apply(Action::SessionResolved(Some(user()))));
        assert!(!state.loading);
        assert_eq!(state.user_id(), Some("u1"));
        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.limit, 10);
    }

    #[test]
    fn test_session_without_user() {
        let mut state = AppState::default();
        assert_eq!(state.apply(Action::SessionResolved(None)), Effect::None);
        assert!(!state.loading);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_logout_from_trending_clears_everything() {
        let mut state = AppState::default();
        state.apply(Action::LoggedIn(user()));
        let request = fetch(state.apply(Action::SelectView(FeedView::Trending)));
        state.apply(Action::FeedLoaded {
            generation: request.generation,
            result: Ok(recipes(3)),
        });
        state.apply(Action::TrendingTagsLoaded {
            generation: request.generation,
            tags: vec![Hashtag {
                tag: "v60".into(),
                ..Default::default()
            }],
        });
        assert_eq!(state.trending_tags.len(), 1);
        state.apply(Action::RecordActivity("Voted".into()));
        state.apply(Action::Search("geisha".into()));
        state.apply(Action::OpenForm(RecipeForm::default()));
        assert!(state.trending_filter_visible());

        assert_eq!(state.apply(Action::LoggedOut), Effect::None);
        assert!(state.user.is_none());
        assert!(state.feed.recipes.is_empty());
        assert!(state.trending_tags.is_empty());
        assert!(state.activity.is_empty());
        assert!(!state.search.is_open());
        assert!(state.form.is_none());
        assert!(state.is_active(&FeedView::Feed));
        assert!(!state.trending_filter_visible());

        // A response for the old session is dropped.
        state.apply(Action::FeedLoaded {
            generation: request.generation,
            result: Ok(recipes(2)),
        });
        assert!(state.feed.recipes.is_empty());
    }

    #[test]
    fn test_first_page_refreshes_trending_tags() {
        let mut state = AppState::default();
        let request = fetch(state.apply(Action::RefreshFeed));
        let effect = state.apply(Action::FeedLoaded {
            generation: request.generation,
            result: Ok(recipes(10)),
        });
        assert_eq!(
            effect,
            Effect::FetchTrendingTags {
                generation: request.generation
            }
        );

        let next = fetch(state.apply(Action::LoadMore));
        assert_eq!(next.query.page, 2);
        let effect = state.apply(Action::FeedLoaded {
            generation: next.generation,
            result: Ok(recipes(4)),
        });
        assert_eq!(effect, Effect::None);
        assert_eq!(state.feed.recipes.len(), 14);
        assert_eq!(state.apply(Action::LoadMore), Effect::None);
    }

    #[test]
    fn test_trending_tags_after_logout_are_dropped() {
        let mut state = AppState::default();
        let request = fetch(state.apply(Action::LoggedIn(user())));
        let effect = state.apply(Action::FeedLoaded {
            generation: request.generation,
            result: Ok(recipes(2)),
        });
        let Effect::FetchTrendingTags { generation } = effect else {
            panic!("expected a trending tag fetch, got {effect:?}");
        };

        state.apply(Action::LoggedOut);
        state.apply(Action::TrendingTagsLoaded {
            generation,
            tags: vec![Hashtag {
                tag: "aeropress".into(),
                ..Default::default()
            }],
        });
        assert!(state.trending_tags.is_empty());
    }

    #[test]
    fn test_short_queries_are_ignored() {
        let mut state = AppState::default();
        assert_eq!(state.apply(Action::Search(" a ".into())), Effect::None);
        assert!(!state.search.is_open());

        let effect = state.apply(Action::Search("kenya".into()));
        let Effect::Search { generation, query } = effect else {
            panic!("expected a search");
        };
        assert_eq!(query, "kenya");
        assert!(state.search.loading);

        state.apply(Action::Search("kenya aa".into()));
        state.apply(Action::SearchLoaded {
            generation,
            recipes: recipes(1),
            users: Vec::new(),
        });
        assert!(state.search.recipes.is_empty(), "stale search applied");
        assert!(state.search.loading);
    }

    #[test]
    fn test_activity_is_capped() {
        let mut state = AppState::default();
        for i in 0..15 {
            state.apply(Action::RecordActivity(format!("event {i}")));
        }
        assert_eq!(state.activity.len(), ACTIVITY_LIMIT);
        assert_eq!(state.activity[0].message, "event 14");
    }

    #[test]
    fn test_switching_view_closes_panels() {
        let mut state = AppState::default();
        state.apply(Action::ShowRecipe(Some("r1".into())));
        state.apply(Action::ShowUser(Some("u2".into())));
        let request = fetch(state.apply(Action::SelectView(FeedView::Hashtag("v60".into()))));
        assert_eq!(request.query.view, FeedView::Hashtag("v60".into()));
        assert!(state.selected_recipe.is_none());
        assert!(state.selected_user.is_none());
    }
}
