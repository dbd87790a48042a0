use anyhow::Context;
use base64::prelude::*;
use serde::Deserialize;

use crate::TokenSource;

/// Secret Manager access, used once per run to read the Gemini API key.
pub struct SecretManagerClient<T> {
    client: reqwest::Client,
    tokens: T,
    base_url: String,
}

#[derive(Deserialize)]
struct AccessResponse {
    payload: SecretPayload,
}

#[derive(Deserialize)]
struct SecretPayload {
    data: String,
}

impl<T: TokenSource + Send + Sync> SecretManagerClient<T> {
    pub fn new(tokens: T) -> Self {
        Self {
            client: reqwest::Client::new(),
            tokens,
            base_url: "https://secretmanager.googleapis.com".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Reads the latest version of `secret` as UTF-8 text.
    pub async fn access_latest(&self, project: &str, secret: &str) -> anyhow::Result<String> {
        let url = format!(
            "{}/v1/projects/{project}/secrets/{secret}/versions/latest:access",
            self.base_url
        );
        let resp = self
            .client
            .get(url)
            .bearer_auth(self.tokens.token().await?)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, secret, "Failed to access secret"))?
            .error_for_status()
            .with_context(|| format!("Secret Manager rejected access to {secret}"))?
            .json::<AccessResponse>()
            .await?;

        decode_payload(&resp.payload.data)
    }
}

fn decode_payload(data: &str) -> anyhow::Result<String> {
    let bytes = BASE64_STANDARD
        .decode(data)
        .context("Secret payload is not valid base64")?;
    String::from_utf8(bytes).context("Secret payload is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_payload() {
        let encoded = BASE64_STANDARD.encode("api-key-123");
        assert_eq!(decode_payload(&encoded).unwrap(), "api-key-123");
    }

    #[test]
    fn rejects_malformed_payload() {
        assert!(decode_payload("not base64!!!").is_err());
    }
}
