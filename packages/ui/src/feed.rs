//! # Feed controller
//!
//! [`FeedState`] owns the paginated recipe list for the selected view. Every
//! change of view, trending window or refresh resets to page 0 and bumps a
//! generation counter; a response is applied only when its generation is
//! still current, so a slow page for a view the user already left is dropped.
//!
//! Page 0 replaces the list, later pages append. `has_more` holds while the
//! last page came back full.

use api::{FeedQuery, FeedView};
use store::Recipe;

/// Trending windows offered in the sidebar, in days.
pub const TRENDING_WINDOWS: [u32; 3] = [1, 7, 30];

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// A page request tagged with the generation it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedRequest {
    pub generation: u64,
    pub query: FeedQuery,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedState {
    pub view: FeedView,
    /// 0-based; the wire page is `page + 1`.
    pub page: u32,
    pub page_size: u32,
    pub trending_days: u32,
    pub recipes: Vec<Recipe>,
    pub has_more: bool,
    pub status: FeedStatus,
    generation: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(10, 7)
    }
}

impl FeedState {
    pub fn new(page_size: u32, trending_days: u32) -> Self {
        Self {
            view: FeedView::Feed,
            page: 0,
            page_size: page_size.max(1),
            trending_days,
            recipes: Vec::new(),
            has_more: false,
            status: FeedStatus::Idle,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop everything and invalidate in-flight requests.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.page = 0;
        self.recipes.clear();
        self.has_more = false;
        self.status = FeedStatus::Idle;
    }

    fn restart(&mut self) -> FeedRequest {
        self.generation += 1;
        self.page = 0;
        self.recipes.clear();
        self.has_more = false;
        self.request()
    }

    /// Switch view and start over from page 0.
    pub fn select_view(&mut self, view: FeedView) -> FeedRequest {
        self.view = view;
        self.restart()
    }

    pub fn set_trending_days(&mut self, days: u32) -> FeedRequest {
        self.trending_days = days;
        self.restart()
    }

    /// Reload the current view from page 0.
    pub fn refresh(&mut self) -> FeedRequest {
        self.restart()
    }

    /// Next page, when the last one was full and nothing is loading.
    pub fn load_more(&mut self) -> Option<FeedRequest> {
        if !self.has_more || self.status == FeedStatus::Loading {
            return None;
        }
        self.page += 1;
        Some(self.request())
    }

    /// Mark the current page as loading and describe it.
    pub fn request(&mut self) -> FeedRequest {
        self.status = FeedStatus::Loading;
        FeedRequest {
            generation: self.generation,
            query: FeedQuery {
                page: self.page + 1,
                limit: self.page_size,
                view: self.view.clone(),
                trending_days: self.trending_days,
            },
        }
    }

    /// Apply a page response. Returns `false` when it was stale and ignored.
    pub fn apply(&mut self, generation: u64, result: Result<Vec<Recipe>, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(page) => {
                self.has_more = page.len() as u32 == self.page_size;
                if self.page == 0 {
                    self.recipes = page;
                } else {
                    self.recipes.extend(page);
                }
                self.status = FeedStatus::Loaded;
            }
            Err(message) => {
                self.recipes.clear();
                self.has_more = false;
                self.status = FeedStatus::Error(message);
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }

    /// Heading and hint shown when the view has no recipes.
    pub fn empty_message(&self) -> (String, &'static str) {
        match &self.view {
            FeedView::Following => (
                "No recipes from people you follow".to_string(),
                "Follow some coffee enthusiasts to see their recipes here!",
            ),
            FeedView::Saved => (
                "No saved recipes".to_string(),
                "Save recipes you love to see them here!",
            ),
            FeedView::Trending => (
                "No trending recipes".to_string(),
                "Be the first to create a trending recipe!",
            ),
            FeedView::Hashtag(tag) => (
                format!("No recipes tagged #{tag}"),
                "Use this hashtag in your next recipe!",
            ),
            FeedView::Feed => (
                "Welcome to What'sYourRecipe!".to_string(),
                "No recipes yet. Be the first to share your perfect coffee moment!",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, prefix: &str) -> Vec<Recipe> {
        (0..n)
            .map(|i| Recipe {
                id: format!("{prefix}{i}"),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_first_page_replaces_and_more_appends() {
        let mut feed = FeedState::new(2, 7);
        let req = feed.refresh();
        assert_eq!(req.query.page, 1);
        assert!(feed.is_loading());
        assert!(feed.apply(req.generation, Ok(page(2, "a"))));
        assert!(feed.has_more);

        let req = feed.load_more().unwrap();
        assert_eq!(req.query.page, 2);
        assert!(feed.apply(req.generation, Ok(page(1, "b"))));
        assert_eq!(feed.recipes.len(), 3);
        assert!(!feed.has_more);
        assert!(feed.load_more().is_none());

        let req = feed.refresh();
        feed.apply(req.generation, Ok(page(1, "c")));
        assert_eq!(feed.recipes.len(), 1);
        assert_eq!(feed.recipes[0].id, "c0");
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut feed = FeedState::new(10, 7);
        let old = feed.select_view(FeedView::Saved);
        let new = feed.select_view(FeedView::Trending);
        assert!(!feed.apply(old.generation, Ok(page(3, "saved"))));
        assert!(feed.recipes.is_empty());
        assert!(feed.is_loading());
        assert!(feed.apply(new.generation, Ok(page(1, "t"))));
        assert_eq!(feed.recipes[0].id, "t0");
        assert_eq!(new.query.view, FeedView::Trending);
    }

    #[test]
    fn test_view_switch_empties_list() {
        let mut feed = FeedState::new(2, 7);
        let req = feed.refresh();
        feed.apply(req.generation, Ok(page(2, "feed")));
        assert!(feed.has_more);

        let req = feed.select_view(FeedView::Saved);
        assert!(feed.recipes.is_empty());
        assert!(!feed.has_more);
        assert!(feed.is_loading());
        assert!(feed.load_more().is_none());
        assert_eq!(req.query.view, FeedView::Saved);
    }

    #[test]
    fn test_zero_page_size_is_raised() {
        let feed = FeedState::new(0, 7);
        assert_eq!(feed.page_size, 1);
    }

    #[test]
    fn test_trending_window_restarts() {
        let mut feed = FeedState::new(10, 7);
        feed.select_view(FeedView::Trending);
        let req = feed.set_trending_days(30);
        assert_eq!(req.query.trending_days, 30);
        assert_eq!(req.query.page, 1);
    }

    #[test]
    fn test_error_clears_list() {
        let mut feed = FeedState::new(10, 7);
        let req = feed.refresh();
        feed.apply(req.generation, Ok(page(3, "a")));
        let req = feed.refresh();
        feed.apply(req.generation, Err("boom".into()));
        assert!(feed.recipes.is_empty());
        assert_eq!(feed.status, FeedStatus::Error("boom".into()));
    }

    #[test]
    fn test_no_load_more_while_loading() {
        let mut feed = FeedState::new(1, 7);
        let req = feed.refresh();
        feed.apply(req.generation, Ok(page(1, "a")));
        assert!(feed.load_more().is_some());
        assert!(feed.load_more().is_none());
    }

    #[test]
    fn test_reset_invalidates() {
        let mut feed = FeedState::new(10, 7);
        let req = feed.refresh();
        feed.reset();
        assert!(!feed.apply(req.generation, Ok(page(1, "a"))));
        assert_eq!(feed.status, FeedStatus::Idle);
    }

    #[test]
    fn test_empty_messages() {
        let mut feed = FeedState::default();
        assert_eq!(feed.empty_message().0, "Welcome to What'sYourRecipe!");
        feed.select_view(FeedView::Hashtag("v60".into()));
        assert_eq!(feed.empty_message().0, "No recipes tagged #v60");
    }
}
