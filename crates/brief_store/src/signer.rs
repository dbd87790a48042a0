use anyhow::Context;
use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{store::gcs::PUBLIC_HOST, TokenSource};

const ALGORITHM: &str = "GOOG4-RSA-SHA256";
const SIGNED_HEADERS: &str = "host";

/// Produces V4 signed URLs for bucket objects by delegating the RSA
/// signature to the IAM Credentials `signBlob` endpoint, impersonating a
/// service account the runtime identity can sign as.
pub struct UrlSigner<T> {
    client: reqwest::Client,
    tokens: T,
    service_account: String,
    base_url: String,
}

#[derive(Deserialize)]
struct SignBlobResponse {
    #[serde(rename = "signedBlob")]
    signed_blob: String,
}

impl<T: TokenSource + Send + Sync> UrlSigner<T> {
    pub fn new(service_account: impl Into<String>, tokens: T) -> Self {
        Self {
            client: reqwest::Client::new(),
            tokens,
            service_account: service_account.into(),
            base_url: "https://iamcredentials.googleapis.com".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Signs a GET URL for `object` in `bucket`, valid for `expires_secs`.
    pub async fn signed_url(
        &self,
        bucket: &str,
        object: &str,
        expires_secs: u32,
    ) -> anyhow::Result<String> {
        let now = Utc::now();
        let request = SigningRequest::new(&self.service_account, bucket, object, now, expires_secs);

        let signature = self.sign_blob(request.string_to_sign().as_bytes()).await?;

        Ok(format!(
            "{PUBLIC_HOST}{}?{}&X-Goog-Signature={}",
            request.resource_path,
            request.canonical_query,
            hex::encode(signature)
        ))
    }

    async fn sign_blob(&self, payload: &[u8]) -> anyhow::Result<Vec<u8>> {
        let url = format!(
            "{}/v1/projects/-/serviceAccounts/{}:signBlob",
            self.base_url, self.service_account
        );
        let body = serde_json::json!({ "payload": BASE64_STANDARD.encode(payload) });

        let resp = self
            .client
            .post(url)
            .bearer_auth(self.tokens.token().await?)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to call signBlob"))?
            .error_for_status()
            .with_context(|| format!("signBlob failed for {}", self.service_account))?
            .json::<SignBlobResponse>()
            .await?;

        BASE64_STANDARD
            .decode(resp.signed_blob)
            .context("signBlob returned invalid base64")
    }
}

/// The deterministic half of V4 signing, split out so it can be checked
/// without a signer.
struct SigningRequest {
    resource_path: String,
    canonical_query: String,
    timestamp: String,
    scope: String,
}

impl SigningRequest {
    fn new(
        service_account: &str,
        bucket: &str,
        object: &str,
        now: DateTime<Utc>,
        expires_secs: u32,
    ) -> Self {
        let timestamp = now.format("%Y%m%dT%H%M%SZ").to_string();
        let scope = format!("{}/auto/storage/goog4_request", now.format("%Y%m%d"));
        let credential = format!("{service_account}/{scope}");

        // Query parameters must appear in sorted order in both the URL and
        // the canonical request.
        let canonical_query = format!(
            "X-Goog-Algorithm={ALGORITHM}\
             &X-Goog-Credential={}\
             &X-Goog-Date={timestamp}\
             &X-Goog-Expires={expires_secs}\
             &X-Goog-SignedHeaders={SIGNED_HEADERS}",
            urlencoding::encode(&credential)
        );

        Self {
            resource_path: format!("/{bucket}/{}", urlencoding::encode(object)),
            canonical_query,
            timestamp,
            scope,
        }
    }

    fn string_to_sign(&self) -> String {
        let canonical_request = format!(
            "GET\n{}\n{}\nhost:storage.googleapis.com\n\n{SIGNED_HEADERS}\nUNSIGNED-PAYLOAD",
            self.resource_path, self.canonical_query
        );
        let digest = hex::encode(Sha256::digest(canonical_request.as_bytes()));

        format!("{ALGORITHM}\n{}\n{}\n{digest}", self.timestamp, self.scope)
    }
}
