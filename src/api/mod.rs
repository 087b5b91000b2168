//! HTTP client for the social posts API.
//!
//! Every call is built against the configured base URL. Authenticated calls
//! carry `Authorization: Bearer <token>` taken from the client's [`Session`];
//! non-success responses become [`ApiError::Status`] with the server's
//! message or a per-operation fallback.

pub mod error;
pub mod models;
pub mod query;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::session::Session;

pub use error::ApiError;
pub use models::{
    Author, Comment, CreatePost, LoginRequest, LoginResponse, Post, PostCounts, Profile,
    Reaction, ReactionSymbol, RegisterRequest, UpdatePost,
};
pub use query::{build_url, PostQuery};

use error::server_message;
use models::{NewComment, ReactionRequest};

/// Post mutations a rendered post needs.
///
/// [`ApiClient`] is the production implementation; controllers depend only on
/// this trait.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn add_comment(&self, post_id: u64, body: &str) -> Result<Comment, ApiError>;

    async fn react(&self, post_id: u64, symbol: ReactionSymbol) -> Result<Reaction, ApiError>;

    async fn delete_post(&self, post_id: u64) -> Result<(), ApiError>;

    async fn update_post(&self, post_id: u64, update: &UpdatePost) -> Result<Post, ApiError>;
}

/// Client for the social API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create an anonymous client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("usernest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session: Session::anonymous(),
        })
    }

    /// The same client acting on behalf of `session`.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List posts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError> {
        let url = build_url(&self.base_url, "social/posts", &query.list_params());
        let request = self.authorized(Method::GET, &url)?;
        let posts: Vec<Post> = self.send(request, "An error occurred").await?;
        debug!(count = posts.len(), "Fetched posts");
        Ok(posts)
    }

    /// Fetch one post.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_post(&self, post_id: u64, query: &PostQuery) -> Result<Post, ApiError> {
        let url = build_url(
            &self.base_url,
            &format!("social/posts/{post_id}"),
            &query.single_post_params(),
        );
        let request = self.authorized(Method::GET, &url)?;
        self.send(request, "Failed to fetch post").await
    }

    /// Create a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create_post(&self, post: &CreatePost) -> Result<Post, ApiError> {
        let url = build_url(&self.base_url, "social/posts", &[]);
        let request = self.authorized(Method::POST, &url)?.json(post);
        let created: Post = self.send(request, "Failed to create post").await?;
        info!(post_id = created.id, "Created post");
        Ok(created)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.send_auth("social/auth/login", credentials).await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn register(&self, registration: &RegisterRequest) -> Result<Profile, ApiError> {
        self.send_auth("social/auth/register", registration).await
    }

    async fn send_auth<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = build_url(&self.base_url, endpoint, &[]);
        let request = self.http.post(&url).json(body);
        self.send(request, "Authentication failed").await
    }

    fn authorized(&self, method: Method, url: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.session.token().ok_or(ApiError::MissingToken)?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send a request and decode the body, mapping failures to [`ApiError`].
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let bytes = self.send_raw(request, fallback).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_raw(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let bytes = response.bytes().await?.to_vec();

        if !status.is_success() {
            let message = server_message(&bytes).unwrap_or_else(|| fallback.to_string());
            warn!(%status, url = %url, message = %message, "API request failed");
            return Err(ApiError::Status { status, message });
        }

        debug!(%status, url = %url, "API request succeeded");
        Ok(bytes)
    }
}

#[async_trait]
impl PostsApi for ApiClient {
    async fn add_comment(&self, post_id: u64, body: &str) -> Result<Comment, ApiError> {
        let url = build_url(&self.base_url, &format!("social/posts/{post_id}/comment"), &[]);
        let request = self
            .authorized(Method::POST, &url)?
            .json(&NewComment { body });
        self.send(request, "Failed to add comment").await
    }

    async fn react(&self, post_id: u64, symbol: ReactionSymbol) -> Result<Reaction, ApiError> {
        let endpoint = format!(
            "social/posts/{post_id}/react/{}",
            urlencoding::encode(symbol.as_str())
        );
        let url = build_url(&self.base_url, &endpoint, &[]);
        let request = self
            .authorized(Method::PUT, &url)?
            .json(&ReactionRequest {
                reaction: symbol.as_str(),
            });
        self.send(request, "Failed to react to post").await
    }

    async fn delete_post(&self, post_id: u64) -> Result<(), ApiError> {
        let url = build_url(&self.base_url, &format!("social/posts/{post_id}"), &[]);
        let request = self.authorized(Method::DELETE, &url)?;
        self.send_raw(request, "Failed to delete post").await?;
        info!(post_id, "Deleted post");
        Ok(())
    }

    async fn update_post(&self, post_id: u64, update: &UpdatePost) -> Result<Post, ApiError> {
        let url = build_url(&self.base_url, &format!("social/posts/{post_id}"), &[]);
        let request = self.authorized(Method::PUT, &url)?.json(update);
        self.send(request, "Failed to update post").await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
