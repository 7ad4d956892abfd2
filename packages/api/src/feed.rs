//! # Feed views and the `GET /recipes` query
//!
//! | View | `view=` | Extra parameter |
//! |------|---------|-----------------|
//! | [`FeedView::Feed`] | `feed` | — |
//! | [`FeedView::Following`] | `following` | — |
//! | [`FeedView::Saved`] | `saved` | — |
//! | [`FeedView::Trending`] | `trending` | `trending_days` |
//! | [`FeedView::Hashtag`] | `hashtag` | `hashtag` |

use std::fmt;

/// Which list the feed shows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FeedView {
    #[default]
    Feed,
    Following,
    Saved,
    Trending,
    Hashtag(String),
}

impl FeedView {
    /// Navigation entries, in sidebar order.
    pub const NAV: [FeedView; 4] = [
        FeedView::Feed,
        FeedView::Following,
        FeedView::Saved,
        FeedView::Trending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedView::Feed => "feed",
            FeedView::Following => "following",
            FeedView::Saved => "saved",
            FeedView::Trending => "trending",
            FeedView::Hashtag(_) => "hashtag",
        }
    }

    pub fn label(&self) -> String {
        match self {
            FeedView::Feed => "Home Feed".to_string(),
            FeedView::Following => "Following".to_string(),
            FeedView::Saved => "Saved".to_string(),
            FeedView::Trending => "Trending".to_string(),
            FeedView::Hashtag(tag) => format!("#{tag}"),
        }
    }

    pub fn is_trending(&self) -> bool {
        matches!(self, FeedView::Trending)
    }
}

impl fmt::Display for FeedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one feed page request. `page` is 1-based.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedQuery {
    pub page: u32,
    pub limit: u32,
    pub view: FeedView,
    pub trending_days: u32,
}

impl FeedQuery {
    /// Query parameters in wire order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("view", self.view.as_str().to_string()),
        ];
        match &self.view {
            FeedView::Trending => params.push(("trending_days", self.trending_days.to_string())),
            FeedView::Hashtag(tag) => params.push(("hashtag", tag.clone())),
            _ => {}
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(view: FeedView) -> FeedQuery {
        FeedQuery {
            page: 2,
            limit: 10,
            view,
            trending_days: 30,
        }
    }

    #[test]
    fn test_trending_days_only_for_trending() {
        let names = |q: FeedQuery| q.params().into_iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(names(query(FeedView::Feed)), vec!["page", "limit", "view"]);
        assert_eq!(
            names(query(FeedView::Trending)),
            vec!["page", "limit", "view", "trending_days"]
        );
        let params = query(FeedView::Hashtag("v60".into())).params();
        assert_eq!(params[2], ("view", "hashtag".to_string()));
        assert_eq!(params[3], ("hashtag", "v60".to_string()));
    }
}
