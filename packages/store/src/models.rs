//! # Domain models for recipes, votes, profiles and hashtags
//!
//! These are the shapes exchanged with the recipe API and rendered by the UI.
//! They are `Serialize + Deserialize` so the same types serve as request
//! payloads and response bodies.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Recipe`] | A recipe record as returned by the server, including the optional embedded author (`profiles`) and vote list. |
//! | [`RecipeDetails`] | The large optional attribute set shared by records and payloads: bean, roast, brew, water, serving and sensory fields. Every field is independently nullable. |
//! | [`RecipeDraft`] | The payload sent to `POST /recipes`. Blank optional fields serialise as `null`. |
//! | [`VoteRecord`] / [`VoteType`] | One user's up/down vote on a recipe. |
//! | [`Profile`] | A user profile (own profile, another user, search hit). |
//! | [`Hashtag`] | A tag with its usage counters. |
//!
//! ## Helpers
//!
//! - [`Recipe::vote_counts`] and [`Recipe::vote_of`] derive card counters from the vote list.
//! - [`format_ratio`] renders a coffee-to-water ratio the way every view shows it.

use serde::{Deserialize, Serialize};

/// Region value that enables the estate sub-field.
pub const INDIA_REGION: &str = "india";

/// A recipe record as stored on the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub recipe_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
    /// Server creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub details: RecipeDetails,
    /// Author projection joined by the server, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<Vec<VoteRecord>>,
}

fn default_public() -> bool {
    true
}

impl Recipe {
    /// Number of up and down votes in the embedded vote list.
    pub fn vote_counts(&self) -> (usize, usize) {
        let votes = self.votes.as_deref().unwrap_or_default();
        let up = votes.iter().filter(|v| v.vote_type == VoteType::Up).count();
        let down = votes.iter().filter(|v| v.vote_type == VoteType::Down).count();
        (up, down)
    }

    /// The vote the given user cast on this recipe, if any.
    pub fn vote_of(&self, user_id: &str) -> Option<VoteType> {
        self.votes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|v| v.user_id.as_deref() == Some(user_id))
            .map(|v| v.vote_type)
    }

    /// Whether the recipe belongs to the given user.
    pub fn is_owned_by(&self, user_id: Option<&str>) -> bool {
        user_id.is_some_and(|id| id == self.user_id)
    }
}

/// Optional brewing attributes of a recipe.
///
/// Field names match the server columns; the form input binding for each one
/// lives in [`crate::schema::RECIPE_FIELDS`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeDetails {
    // Bean
    pub bean_variety: Option<String>,
    pub bean_region: Option<String>,
    pub india_estate: Option<String>,
    pub processing_type: Option<String>,

    // Roast
    pub roast_type: Option<String>,
    pub roast_level: Option<String>,
    pub crack_time: Option<String>,
    pub roast_time: Option<f64>,
    pub development_time: Option<f64>,

    // Brew
    pub brew_method: Option<String>,
    pub grind_microns: Option<i64>,
    pub water_composition: Option<String>,
    pub tds: Option<f64>,
    pub calcium: Option<f64>,
    pub magnesium: Option<f64>,
    pub potassium: Option<f64>,
    pub sodium: Option<f64>,
    pub coffee_amount: Option<f64>,
    pub water_amount: Option<f64>,
    pub water_temp: Option<i64>,
    pub brew_time: Option<f64>,

    // Serving
    pub milk_preference: Option<String>,
    pub serving_temp: Option<String>,
    pub sweetener: Option<String>,
    pub sweetener_quantity: Option<f64>,
    pub serving_size: Option<f64>,

    // Sensory
    pub aroma_notes: Option<String>,
    pub body: Option<String>,
    pub acidity_type: Option<String>,
    pub sweetness: Option<String>,
    pub balance: Option<String>,
    pub aftertaste: Option<String>,
    pub clean_cup: Option<String>,
    pub uniformity: Option<String>,
    pub cupping_score: Option<f64>,
    pub cupping_method: Option<String>,
    pub defects: Option<String>,
    pub overall_impression: Option<String>,

    pub brewing_notes: Option<String>,
}

impl RecipeDetails {
    /// Water-to-coffee ratio, when both amounts are positive.
    pub fn ratio(&self) -> Option<f64> {
        match (self.coffee_amount, self.water_amount) {
            (Some(coffee), Some(water)) if coffee > 0.0 && water > 0.0 => Some(water / coffee),
            _ => None,
        }
    }
}

/// `1:<ratio>` with one decimal. Ties round away from zero (`16.25` → `1:16.3`).
pub fn format_ratio(ratio: f64) -> String {
    format!("1:{:.1}", (ratio * 10.0).round() / 10.0)
}

/// Payload for `POST /recipes`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub recipe_name: String,
    pub description: String,
    pub rating: Option<f64>,
    pub date_created: Option<String>,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub details: RecipeDetails,
}

/// Author fields joined onto a recipe.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Direction of a vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Up => "up",
            VoteType::Down => "down",
        }
    }
}

/// A single vote as embedded in a recipe record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub vote_type: VoteType,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// A user profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: Option<String>,
}

impl Profile {
    /// Full name, then username, then email.
    pub fn display_name(&self) -> &str {
        [&self.full_name, &self.username, &self.email]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("Unknown User")
    }

    /// Single upper-case letter shown when there is no avatar image.
    pub fn initial(&self) -> String {
        initial_of(self.full_name.as_deref(), self.username.as_deref())
    }
}

/// First letter of the full name, then of the username, defaulting to `U`.
pub fn initial_of(full_name: Option<&str>, username: Option<&str>) -> String {
    [full_name, username]
        .into_iter()
        .flatten()
        .find_map(|s| s.chars().next())
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_else(|| "U".to_string())
}

/// A hashtag and its usage counters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hashtag {
    pub tag: String,
    pub usage_count: u32,
    /// Uses inside the requested trending window, when the server reports it.
    pub recent_count: Option<u32>,
    pub last_used: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_deserializes_sparse_record() {
        let json = r#"{
            "id": "r1",
            "user_id": "u1",
            "recipe_name": "Morning V60",
            "description": "Bright and clean",
            "rating": 8.5,
            "coffee_amount": 18,
            "water_amount": 300,
            "votes": [
                {"vote_type": "up", "user_id": "u2"},
                {"vote_type": "down", "user_id": "u3"},
                {"vote_type": "up", "user_id": "u4"}
            ]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert!(recipe.is_public);
        assert_eq!(recipe.details.coffee_amount, Some(18.0));
        assert_eq!(recipe.details.bean_variety, None);
        assert_eq!(recipe.vote_counts(), (2, 1));
        assert_eq!(recipe.vote_of("u3"), Some(VoteType::Down));
        assert_eq!(recipe.vote_of("u9"), None);
    }

    #[test]
    fn test_null_votes_are_tolerated() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": "r1", "votes": null}"#).unwrap();
        assert_eq!(recipe.vote_counts(), (0, 0));
    }

    #[test]
    fn test_draft_serializes_blank_fields_as_null() {
        let draft = RecipeDraft {
            recipe_name: "Test".to_string(),
            description: "Desc".to_string(),
            rating: Some(7.0),
            date_created: Some("2024-01-01".to_string()),
            is_public: true,
            user_id: None,
            details: RecipeDetails::default(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value["tds"].is_null());
        assert!(value["grind_microns"].is_null());
        assert!(value["bean_variety"].is_null());
        assert!(value.get("user_id").is_none());
        assert_eq!(value["is_public"], true);
    }

    #[test]
    fn test_ratio_requires_both_amounts() {
        let mut details = RecipeDetails {
            coffee_amount: Some(18.0),
            ..Default::default()
        };
        assert_eq!(details.ratio(), None);
        details.water_amount = Some(300.0);
        let ratio = details.ratio().unwrap();
        assert!((ratio - 16.666).abs() < 0.01);
    }

    #[test]
    fn test_profile_display_and_initial() {
        let profile = Profile {
            id: "u1".to_string(),
            username: Some("barista".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "barista");
        assert_eq!(profile.initial(), "B");
        assert_eq!(initial_of(None, None), "U");
        assert_eq!(initial_of(Some("ada"), Some("zed")), "A");
    }

    #[test]
    fn test_format_ratio_rounds_ties_up() {
        assert_eq!(format_ratio(325.0 / 20.0), "1:16.3");
        assert_eq!(format_ratio(300.0 / 18.0), "1:16.7");
        assert_eq!(format_ratio(16.0), "1:16.0");
    }
}
