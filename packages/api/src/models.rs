//! Request and response bodies for the auth, vote, follow and health endpoints.

use serde::{Deserialize, Serialize};
use store::{Profile, VoteType};

/// Body of `POST /auth/signup`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: String,
}

impl SignupRequest {
    /// Name of the first blank field, in form order.
    pub fn first_missing(&self) -> Option<&'static str> {
        [
            ("full name", &self.full_name),
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User summary returned with a login.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginUser {
    pub id: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

impl From<LoginUser> for Profile {
    fn from(user: LoginUser) -> Self {
        Profile {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            ..Profile::default()
        }
    }
}

/// Response of `POST /auth/login`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<LoginUser>,
}

/// Generic `{message: ...}` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: Option<String>,
}

/// Body of `POST /votes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub recipe_id: String,
    pub vote_type: VoteType,
}

/// Response of `POST /follow/{id}`: the resulting edge state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowResponse {
    pub message: Option<String>,
    pub following: bool,
}

/// Response of `GET /health`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub status: Option<String>,
    pub environment: Option<String>,
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_first_missing() {
        let mut req = SignupRequest {
            email: "a@b.c".into(),
            password: "secret".into(),
            username: "  ".into(),
            full_name: "Ada".into(),
        };
        assert_eq!(req.first_missing(), Some("username"));
        req.username = "ada".into();
        assert_eq!(req.first_missing(), None);
    }

    #[test]
    fn test_login_user_into_profile() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"access_token": "t", "user": {"id": "u1", "username": "ada"}}"#,
        )
        .unwrap();
        let profile = Profile::from(response.user.unwrap());
        assert_eq!(profile.id, "u1");
        assert_eq!(profile.display_name(), "ada");
        assert!(profile.avatar_url.is_none());
    }

    #[test]
    fn test_vote_request_wire_format() {
        let body = serde_json::to_value(VoteRequest {
            recipe_id: "r1".into(),
            vote_type: VoteType::Down,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"recipe_id": "r1", "vote_type": "down"}));
    }
}
