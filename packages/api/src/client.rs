//! # REST client
//!
//! [`ApiClient`] wraps a `reqwest::Client`, the API base URL and the bearer
//! token. It is cheap to clone; clones share the token.
//!
//! ## Request pipeline
//!
//! Every call goes through one private `send`:
//!
//! 1. Build the URL from path segments (each percent-encoded) and query pairs.
//! 2. Attach `Content-Type: application/json`, the JSON body if any, and
//!    `Authorization: Bearer <token>` when a token is held.
//! 3. Non-2xx: decode `{detail}` into an [`ApiError`].
//! 4. 2xx: an empty or non-JSON body is treated as `{}`.
//!
//! ## Token persistence
//!
//! With [`with_token_store`](ApiClient::with_token_store) the token is read
//! from and written to a [`KeyValueStore`] under [`TOKEN_KEY`], so a reload
//! restores the session.
//!
//! ## Endpoints
//!
//! | Method | HTTP |
//! |--------|------|
//! | [`health`](ApiClient::health) | `GET /health` |
//! | [`signup`](ApiClient::signup) | `POST /auth/signup` |
//! | [`login`](ApiClient::login) | `POST /auth/login` (stores `access_token`) |
//! | [`logout`](ApiClient::logout) | `POST /auth/logout` (always drops the token) |
//! | [`resend_confirmation`](ApiClient::resend_confirmation) | `POST /auth/resend-confirmation` |
//! | [`profile`](ApiClient::profile) | `GET /users/profile` |
//! | [`user`](ApiClient::user) | `GET /users/{id}` |
//! | [`search_users`](ApiClient::search_users) | `GET /users/search/{query}?limit=` |
//! | [`create_recipe`](ApiClient::create_recipe) | `POST /recipes` |
//! | [`recipes`](ApiClient::recipes) | `GET /recipes?page=&limit=&view=...` |
//! | [`recipe`](ApiClient::recipe) | `GET /recipes/{id}` |
//! | [`search_recipes`](ApiClient::search_recipes) | `GET /recipes/search/{query}?limit=` |
//! | [`cast_vote`](ApiClient::cast_vote) | `POST /votes` |
//! | [`toggle_follow`](ApiClient::toggle_follow) | `POST /follow/{id}` |
//! | [`trending_hashtags`](ApiClient::trending_hashtags) | `GET /hashtags/trending?days=&limit=` |

use std::sync::{Arc, Mutex, PoisonError};

use reqwest::{header, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::{Hashtag, KeyValueStore, Profile, Recipe, RecipeDraft, VoteType};

use crate::error::ApiError;
use crate::feed::FeedQuery;
use crate::models::{
    FollowResponse, HealthResponse, LoginRequest, LoginResponse, MessageResponse, SignupRequest,
    VoteRequest,
};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "access_token";

type TokenStore = Arc<dyn KeyValueStore + Send + Sync>;

/// Client for the recipe REST API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Arc<Mutex<Option<String>>>,
    tokens: Option<TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && Arc::ptr_eq(&self.token, &other.token)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: Arc::new(Mutex::new(None)),
            tokens: None,
        }
    }

    /// Persist the token in `store`, restoring any token already saved there.
    pub fn with_token_store(mut self, store: TokenStore) -> Self {
        let saved = store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty());
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = saved;
        self.tokens = Some(store);
        self
    }

    /// Use a preconfigured HTTP client.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Replace the token; `None` removes it from the store as well.
    pub fn set_token(&self, token: Option<String>) {
        if let Some(store) = &self.tokens {
            match &token {
                Some(t) => {
                    if let Err(e) = store.set(TOKEN_KEY, t) {
                        tracing::warn!("failed to persist access token: {e}");
                    }
                }
                None => store.remove(TOKEN_KEY),
            }
        }
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn require_token(&self) -> Result<(), ApiError> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(ApiError::NotLoggedIn)
        }
    }

    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(segments, query)?;
        tracing::debug!(%method, %url, "api request");

        let mut request = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.inspect_err(|e| {
            tracing::error!("api request failed: {e}");
        })?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &text);
            tracing::warn!(status = status.as_u16(), "api error: {err}");
            return Err(err);
        }
        Ok(parse_body(&text))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let value = self.send(method, segments, query, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Like `request`, but `null` or `{}` decode as an empty list.
    async fn list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        match self.send(Method::GET, segments, query, None).await? {
            Value::Null => Ok(Vec::new()),
            Value::Object(map) if map.is_empty() => Ok(Vec::new()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    fn json<B: Serialize>(body: &B) -> Result<Option<Value>, ApiError> {
        Ok(Some(serde_json::to_value(body)?))
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.request(Method::GET, &["health"], &[], None).await
    }

    pub async fn signup(&self, req: &SignupRequest) -> Result<MessageResponse, ApiError> {
        self.request(Method::POST, &["auth", "signup"], &[], Self::json(req)?)
            .await
    }

    /// Log in and keep the returned `access_token`.
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self
            .request(Method::POST, &["auth", "login"], &[], Self::json(req)?)
            .await?;
        if let Some(token) = response.access_token.clone().filter(|t| !t.is_empty()) {
            self.set_token(Some(token));
            tracing::info!("logged in");
        }
        Ok(response)
    }

    /// Tell the server, then drop the token whatever the outcome.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self
            .request::<MessageResponse>(Method::POST, &["auth", "logout"], &[], None)
            .await;
        self.set_token(None);
        tracing::info!("logged out");
        result.map(|_| ())
    }

    /// The body is the email as a bare JSON string.
    pub async fn resend_confirmation(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let body = Some(Value::String(email.to_string()));
        self.request(Method::POST, &["auth", "resend-confirmation"], &[], body)
            .await
    }

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.request(Method::GET, &["users", "profile"], &[], None)
            .await
    }

    pub async fn user(&self, user_id: &str) -> Result<Profile, ApiError> {
        self.request(Method::GET, &["users", user_id], &[], None).await
    }

    pub async fn search_users(&self, query: &str, limit: u32) -> Result<Vec<Profile>, ApiError> {
        self.list(&["users", "search", query], &[("limit", limit.to_string())])
            .await
    }

    pub async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        self.require_token()?;
        self.request(Method::POST, &["recipes"], &[], Self::json(draft)?)
            .await
    }

    pub async fn recipes(&self, query: &FeedQuery) -> Result<Vec<Recipe>, ApiError> {
        self.list(&["recipes"], &query.params()).await
    }

    pub async fn recipe(&self, recipe_id: &str) -> Result<Recipe, ApiError> {
        self.request(Method::GET, &["recipes", recipe_id], &[], None)
            .await
    }

    pub async fn search_recipes(&self, query: &str, limit: u32) -> Result<Vec<Recipe>, ApiError> {
        self.list(&["recipes", "search", query], &[("limit", limit.to_string())])
            .await
    }

    /// Cast a vote. The server toggles or flips an existing vote.
    pub async fn cast_vote(
        &self,
        recipe_id: &str,
        vote_type: VoteType,
    ) -> Result<MessageResponse, ApiError> {
        self.require_token()?;
        let body = VoteRequest {
            recipe_id: recipe_id.to_string(),
            vote_type,
        };
        self.request(Method::POST, &["votes"], &[], Self::json(&body)?)
            .await
    }

    /// Follow or unfollow; the response carries the resulting state.
    pub async fn toggle_follow(&self, user_id: &str) -> Result<FollowResponse, ApiError> {
        self.require_token()?;
        self.request(Method::POST, &["follow", user_id], &[], None)
            .await
    }

    pub async fn trending_hashtags(&self, days: u32, limit: u32) -> Result<Vec<Hashtag>, ApiError> {
        self.list(
            &["hashtags", "trending"],
            &[("days", days.to_string()), ("limit", limit.to_string())],
        )
        .await
    }
}

/// Empty or non-JSON success bodies read as `{}`.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(Default::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedView;
    use store::MemoryStore;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::mpsc;

    #[derive(Debug)]
    struct Captured {
        method: String,
        target: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl Captured {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }
    }

    /// Serve `responses` in order, one connection each, recording every request.
    async fn responder(
        responses: Vec<(u16, &'static str)>,
    ) -> (String, mpsc::UnboundedReceiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let captured = read_request(&mut socket).await;
                let _ = tx.send(captured);
                let response = format!(
                    "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });
        (format!("http://{addr}"), rx)
    }

    async fn read_request(socket: &mut TcpStream) -> Captured {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.split("\r\n");
        let mut request_line = lines.next().unwrap_or_default().split(' ');
        let method = request_line.next().unwrap_or_default().to_string();
        let target = request_line.next().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
            .collect();
        let len = headers
            .iter()
            .find(|(k, _)| k == "content-length")
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + len {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
        Captured {
            method,
            target,
            headers,
            body,
        }
    }

    fn client(base: &str) -> ApiClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        ApiClient::new(base).with_http_client(http)
    }

    #[tokio::test]
    async fn test_login_stores_token_and_sends_bearer() {
        let (base, mut rx) = responder(vec![
            (200, r#"{"access_token": "tok", "refresh_token": "ref", "user": {"id": "u1"}}"#),
            (200, r#"{"id": "u1", "username": "barista"}"#),
        ])
        .await;
        let store = Arc::new(MemoryStore::new());
        let api = client(&base).with_token_store(store.clone());

        let response = api
            .login(&LoginRequest {
                email: "a@b.c".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.user.map(|u| u.id).as_deref(), Some("u1"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok"));

        let login = rx.recv().await.unwrap();
        assert_eq!(login.method, "POST");
        assert_eq!(login.target, "/auth/login");
        assert_eq!(login.header("authorization"), None);
        let body: Value = serde_json::from_str(&login.body).unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@b.c", "password": "pw"}));

        let profile = api.profile().await.unwrap();
        assert_eq!(profile.display_name(), "barista");
        let request = rx.recv().await.unwrap();
        assert_eq!(request.target, "/users/profile");
        assert_eq!(request.header("authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_token_restored_from_store() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "saved").unwrap();
        let api = ApiClient::new("http://localhost:8000").with_token_store(store);
        assert_eq!(api.token().as_deref(), Some("saved"));
    }

    #[tokio::test]
    async fn test_logout_drops_token_even_when_server_fails() {
        let (base, _rx) = responder(vec![(500, r#"{"detail": "boom"}"#)]).await;
        let store = Arc::new(MemoryStore::new());
        let api = client(&base).with_token_store(store.clone());
        api.set_token(Some("tok".into()));

        let err = api.logout().await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(!api.is_logged_in());
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_feed_query_string() {
        let (base, mut rx) = responder(vec![(200, "[]"), (200, "null")]).await;
        let api = client(&base);

        let query = FeedQuery {
            page: 1,
            limit: 10,
            view: FeedView::Trending,
            trending_days: 7,
        };
        assert!(api.recipes(&query).await.unwrap().is_empty());
        let request = rx.recv().await.unwrap();
        assert_eq!(
            request.target,
            "/recipes?page=1&limit=10&view=trending&trending_days=7"
        );

        let query = FeedQuery {
            page: 3,
            view: FeedView::Following,
            ..query
        };
        assert!(api.recipes(&query).await.unwrap().is_empty());
        let request = rx.recv().await.unwrap();
        assert_eq!(request.target, "/recipes?page=3&limit=10&view=following");
    }

    #[tokio::test]
    async fn test_search_query_is_percent_encoded() {
        let (base, mut rx) = responder(vec![(200, r#"[{"id": "r1", "recipe_name": "Cold"}]"#)]).await;
        let api = client(&base);

        let found = api.search_recipes("cold brew/#1", 5).await.unwrap();
        assert_eq!(found.len(), 1);
        let request = rx.recv().await.unwrap();
        assert_eq!(request.target, "/recipes/search/cold%20brew%2F%231?limit=5");
    }

    #[tokio::test]
    async fn test_empty_success_body_reads_as_empty_object() {
        let (base, mut rx) = responder(vec![(200, "")]).await;
        let api = client(&base);
        api.set_token(Some("tok".into()));

        let response = api.cast_vote("r1", VoteType::Up).await.unwrap();
        assert_eq!(response, MessageResponse::default());
        let request = rx.recv().await.unwrap();
        assert_eq!(request.target, "/votes");
        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body, serde_json::json!({"recipe_id": "r1", "vote_type": "up"}));
    }

    #[tokio::test]
    async fn test_validation_error_is_reported() {
        let (base, _rx) = responder(vec![(
            422,
            r#"{"detail": [{"loc": ["body", "rating"], "msg": "field required"}]}"#,
        )])
        .await;
        let api = client(&base);
        api.set_token(Some("tok".into()));

        let err = api.create_recipe(&RecipeDraft::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Validation Error: body.rating - field required");
    }

    #[tokio::test]
    async fn test_session_calls_fail_fast_without_token() {
        // Nothing listens here; a request would fail with a transport error.
        let api = client("http://127.0.0.1:9");
        assert!(matches!(
            api.cast_vote("r1", VoteType::Up).await,
            Err(ApiError::NotLoggedIn)
        ));
        assert!(matches!(api.toggle_follow("u1").await, Err(ApiError::NotLoggedIn)));
        assert!(matches!(
            api.create_recipe(&RecipeDraft::default()).await,
            Err(ApiError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_follow_and_resend_bodies() {
        let (base, mut rx) = responder(vec![
            (200, r#"{"message": "Following", "following": true}"#),
            (200, r#"{"message": "Confirmation email sent"}"#),
        ])
        .await;
        let api = client(&base);
        api.set_token(Some("tok".into()));

        assert!(api.toggle_follow("u 2").await.unwrap().following);
        assert_eq!(rx.recv().await.unwrap().target, "/follow/u%202");

        let sent = api.resend_confirmation("a@b.c").await.unwrap();
        assert_eq!(sent.message.as_deref(), Some("Confirmation email sent"));
        assert_eq!(rx.recv().await.unwrap().body, "\"a@b.c\"");
    }

    #[tokio::test]
    async fn test_trending_hashtags() {
        let (base, mut rx) = responder(vec![(
            200,
            r#"[{"tag": "v60", "usage_count": 12, "recent_count": 4}]"#,
        )])
        .await;
        let api = client(&base);

        let tags = api.trending_hashtags(30, 10).await.unwrap();
        assert_eq!(tags[0].tag, "v60");
        assert_eq!(tags[0].recent_count, Some(4));
        assert_eq!(rx.recv().await.unwrap().target, "/hashtags/trending?days=30&limit=10");
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), serde_json::json!({}));
        assert_eq!(parse_body("OK"), serde_json::json!({}));
        assert_eq!(parse_body("[1]"), serde_json::json!([1]));
    }
}
