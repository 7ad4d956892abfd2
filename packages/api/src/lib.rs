//! # API crate — REST client for the recipe server
//!
//! Everything the UI needs to talk to the remote recipe API. The client is a
//! leaf dependency: it attaches the bearer token, serialises JSON bodies and
//! turns non-2xx responses into typed [`ApiError`]s. It holds no view state.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: token handling, the request pipeline and one method per endpoint |
//! | [`error`] | [`ApiError`] taxonomy and the `{detail: ...}` error body decoding |
//! | [`feed`] | [`FeedView`] / [`FeedQuery`]: the `GET /recipes` query string per view |
//! | [`models`] | Request and response bodies that are not domain records |
//!
//! Domain records (`Recipe`, `Profile`, `Hashtag`, ...) live in the `store`
//! crate and are re-exported here for convenience.

pub mod client;
pub mod error;
pub mod feed;
pub mod models;

pub use client::{ApiClient, TOKEN_KEY};
pub use error::ApiError;
pub use feed::{FeedQuery, FeedView};
pub use models::{
    FollowResponse, HealthResponse, LoginRequest, LoginResponse, LoginUser, MessageResponse,
    SignupRequest, VoteRequest,
};

pub use store::{Hashtag, Profile, Recipe, RecipeDraft, VoteType};
