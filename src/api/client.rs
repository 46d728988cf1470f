//! Finance Backend Client
//!
//! HTTP client for the dashboard's REST endpoints.

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::dto::{
    AuthStatus, Credentials, LoginFailure, NewTransaction, Period, QuickStats, SpendingAnalysis,
    Transaction, User,
};
use super::error::{ClientError, ClientResult};

/// Login page the dashboard redirects to when unauthenticated
pub const LOGIN_PATH: &str = "/login";
/// Dashboard landing page after a successful login
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Logout endpoint
pub const LOGOUT_PATH: &str = "/auth/logout";
/// Google OAuth entry point
pub const GOOGLE_LOGIN_PATH: &str = "/auth/google/login";
/// GitHub OAuth entry point
pub const GITHUB_LOGIN_PATH: &str = "/auth/github/login";

/// Header carrying a per-request id
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Operations the dashboard needs from the backend
#[async_trait]
pub trait FinanceApi: Send + Sync {
    async fn user(&self) -> ClientResult<User>;

    async fn quick_stats(&self) -> ClientResult<QuickStats>;

    async fn transactions(&self) -> ClientResult<Vec<Transaction>>;

    async fn spending_analysis(&self, period: Period) -> ClientResult<SpendingAnalysis>;

    async fn add_transaction(&self, transaction: &NewTransaction) -> ClientResult<()>;

    /// Probe the session. Any non-success status means unauthenticated.
    async fn check_auth(&self) -> ClientResult<AuthStatus>;

    async fn login(&self, credentials: &Credentials) -> ClientResult<()>;
}

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Session cookie sent with every request, as `name=value`
    pub session_cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 30_000,
            session_cookie: None,
        }
    }
}

/// reqwest-backed [`FinanceApi`]
///
/// Keeps a cookie jar, so a successful [`FinanceApi::login`] authenticates
/// every later call made through the same client. A preset session cookie
/// is seeded into the same jar and sent alongside cookies set later.
pub struct FinanceClient {
    client: Client,
    config: ClientConfig,
}

impl FinanceClient {
    /// Create a client with the given configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let jar = Jar::default();
        if let Some(cookie) = config.session_cookie.as_deref() {
            let url: Url = config.base_url.parse().map_err(|e| {
                ClientError::InvalidConfig(format!("Invalid base URL {}: {}", config.base_url, e))
            })?;
            jar.add_cookie_str(cookie, &url);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .cookie_provider(Arc::new(jar))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .header(REQUEST_ID_HEADER, request_id())
            .send()
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl FinanceApi for FinanceClient {
    async fn user(&self) -> ClientResult<User> {
        self.get_json("/api/user").await
    }

    async fn quick_stats(&self) -> ClientResult<QuickStats> {
        self.get_json("/api/quick-stats").await
    }

    async fn transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.get_json("/api/transactions").await
    }

    async fn spending_analysis(&self, period: Period) -> ClientResult<SpendingAnalysis> {
        let response = self
            .client
            .get(self.url("/api/analysis"))
            .query(&[("period", period.as_str())])
            .header(REQUEST_ID_HEADER, request_id())
            .send()
            .await?;
        decode(response).await
    }

    async fn add_transaction(&self, transaction: &NewTransaction) -> ClientResult<()> {
        let response = self
            .client
            .post(self.url("/api/transactions"))
            .header(REQUEST_ID_HEADER, request_id())
            .json(transaction)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    async fn check_auth(&self) -> ClientResult<AuthStatus> {
        let response = self
            .client
            .get(self.url("/api/check-auth"))
            .header(REQUEST_ID_HEADER, request_id())
            .send()
            .await?;

        if response.status().is_success() {
            Ok(AuthStatus::Authenticated)
        } else {
            tracing::debug!(status = %response.status(), "Auth check rejected");
            Ok(AuthStatus::Unauthenticated)
        }
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<()> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .header(REQUEST_ID_HEADER, request_id())
            .json(credentials)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<LoginFailure>(&text)
            .ok()
            .and_then(|f| f.detail)
            .unwrap_or(text);
        Err(ClientError::Api { status, message })
    }
}

fn request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    ClientError::Api { status, message }
}
