use std::future::Future;
use std::sync::Mutex;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Supplies OAuth bearer tokens for Google REST calls.
pub trait TokenSource {
    fn token(&self) -> impl Future<Output = anyhow::Result<String>> + Send;
}

impl<T: TokenSource + Send + Sync> TokenSource for &T {
    async fn token(&self) -> anyhow::Result<String> {
        (**self).token().await
    }
}

/// Fetches access tokens from the GCE/Cloud Run metadata server for the
/// runtime's default service account.
pub struct MetadataTokenSource {
    client: reqwest::Client,
    base_url: String,
    cached: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl Default for MetadataTokenSource {
    fn default() -> Self {
        Self::new("http://metadata.google.internal")
    }
}

impl MetadataTokenSource {
    const TOKEN_PATH: &'static str =
        "/computeMetadata/v1/instance/service-accounts/default/token";

    /// Tokens within this window of expiry are refreshed eagerly.
    const EXPIRY_SLACK_SECONDS: i64 = 60;

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            cached: Mutex::new(None),
        }
    }

    async fn fetch(&self) -> anyhow::Result<CachedToken> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, Self::TOKEN_PATH))
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to reach metadata server"))?
            .error_for_status()
            .context("Metadata server rejected token request")?
            .json::<TokenResponse>()
            .await?;

        Ok(CachedToken {
            token: resp.access_token,
            expires_at: Utc::now() + Duration::seconds(resp.expires_in),
        })
    }
}

impl TokenSource for MetadataTokenSource {
    async fn token(&self) -> anyhow::Result<String> {
        let deadline = Utc::now() + Duration::seconds(Self::EXPIRY_SLACK_SECONDS);
        if let Some(cached) = self.cached.lock().unwrap().as_ref() {
            if cached.expires_at > deadline {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *self.cached.lock().unwrap() = Some(fresh);
        Ok(token)
    }
}
