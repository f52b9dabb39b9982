use super::models::{CreateTweetRequest, Envelope, XTweet, XUser};
use crate::limiter::PostLimiter;
use crate::poster::{Identity, PostReceipt, PostResult, Poster};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, instrument, warn};
use tweetloom_error::{PostError, PostErrorKind};
use tweetloom_history::PostMetrics;

/// Production API root.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";
/// Environment variable holding the OAuth 2.0 user-context access token.
pub const BEARER_TOKEN_ENV: &str = "TWITTER_BEARER_TOKEN";
/// Environment variable overriding the API root.
pub const API_BASE_ENV: &str = "TWITTER_API_BASE";

const DEFAULT_REQUESTS_PER_WINDOW: u32 = 50;
const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// X API v2 client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct XClient {
    client: Client,
    api_base: String,
    token: String,
    limiter: PostLimiter,
}

impl XClient {
    /// Create a client for `api_base` with the default rate limit of 50
    /// requests per 15 minutes.
    ///
    /// # Errors
    ///
    /// Returns [`PostErrorKind::MissingCredentials`] for an empty token.
    pub fn new(token: impl Into<String>, api_base: impl Into<String>) -> PostResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(PostError::new(PostErrorKind::MissingCredentials(format!(
                "{} is empty",
                BEARER_TOKEN_ENV
            ))));
        }
        let api_base = api_base.into().trim_end_matches('/').to_string();
        debug!(api_base = %api_base, "Creating X client");
        Ok(Self {
            client: Client::new(),
            api_base,
            token,
            limiter: PostLimiter::new(DEFAULT_REQUESTS_PER_WINDOW, DEFAULT_WINDOW),
        })
    }

    /// Create a client from `TWITTER_BEARER_TOKEN`, with `TWITTER_API_BASE`
    /// overriding `api_base` when set.
    pub fn from_env(api_base: impl Into<String>) -> PostResult<Self> {
        let token = std::env::var(BEARER_TOKEN_ENV).map_err(|_| {
            PostError::new(PostErrorKind::MissingCredentials(format!(
                "{} is not set",
                BEARER_TOKEN_ENV
            )))
        })?;
        let api_base = std::env::var(API_BASE_ENV).unwrap_or_else(|_| api_base.into());
        Self::new(token, api_base)
    }

    /// Replace the rate limiter.
    pub fn with_limiter(mut self, limiter: PostLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// API root in use.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PostResult<Option<T>> {
        self.limiter.acquire().await;

        let response = request.bearer_auth(&self.token).send().await.map_err(|e| {
            error!(error = ?e, "Request to X API failed");
            PostError::new(PostErrorKind::Http(e.to_string()))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse X API response");
            PostError::new(PostErrorKind::InvalidResponse(e.to_string()))
        })?;
        Ok(envelope.data)
    }

    /// Fetch one post with its public metrics.
    #[instrument(skip(self))]
    pub async fn tweet(&self, post_id: &str) -> PostResult<Option<XTweet>> {
        let request = self
            .client
            .get(self.url(&format!("/2/tweets/{}", post_id)))
            .query(&[("tweet.fields", "public_metrics")]);
        self.send(request).await
    }

    /// Fetch the authenticated user.
    #[instrument(skip(self))]
    pub async fn me(&self) -> PostResult<Option<XUser>> {
        self.send(self.client.get(self.url("/2/users/me"))).await
    }
}

async fn check_status(response: Response) -> PostResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "X API rejected credentials");
            Err(PostError::new(PostErrorKind::Unauthorized(body)))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let wait = retry_after_secs(&response);
            warn!(retry_after_secs = wait, "X API rate limit hit");
            Err(PostError::new(PostErrorKind::RateLimited(wait)))
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "X API returned error");
            Err(PostError::new(PostErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }))
        }
    }
}

/// Seconds until the rate limit window resets, from `x-rate-limit-reset`
/// (epoch seconds) or `retry-after`.
fn retry_after_secs(response: &Response) -> u64 {
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };

    if let Some(reset) = header("x-rate-limit-reset") {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        return reset.saturating_sub(now);
    }
    header("retry-after").unwrap_or(0)
}

#[async_trait]
impl Poster for XClient {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn post(&self, text: &str) -> PostResult<PostReceipt> {
        let request = self
            .client
            .post(self.url("/2/tweets"))
            .json(&CreateTweetRequest { text });

        let tweet: XTweet = self.send(request).await?.ok_or_else(|| {
            PostError::new(PostErrorKind::InvalidResponse(
                "No data in create response".to_string(),
            ))
        })?;

        info!(post_id = %tweet.id(), "Posted to X");
        let text = if tweet.text().is_empty() {
            text.to_string()
        } else {
            tweet.text().clone()
        };
        Ok(PostReceipt::new(tweet.id().clone(), text))
    }

    async fn identity(&self) -> PostResult<Option<Identity>> {
        Ok(self
            .me()
            .await?
            .map(|user| Identity::new(user.id(), user.name(), user.username())))
    }

    async fn metrics(&self, post_id: &str) -> PostResult<Option<PostMetrics>> {
        Ok(self
            .tweet(post_id)
            .await?
            .and_then(|tweet| *tweet.public_metrics())
            .map(PostMetrics::from))
    }

    fn name(&self) -> &str {
        "x"
    }
}
