use anyhow::Context;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{ObjectStore, TokenSource};

pub(crate) const PUBLIC_HOST: &str = "https://storage.googleapis.com";

/// Cloud Storage over the JSON API, scoped to a single bucket.
pub struct GcsStore<T> {
    client: reqwest::Client,
    bucket: String,
    tokens: T,
    base_url: String,
}

#[derive(Deserialize)]
struct ListResponse {
    items: Option<Vec<ObjectMeta>>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ObjectMeta {
    name: String,
}

impl<T: TokenSource + Send + Sync> GcsStore<T> {
    pub fn new(bucket: impl Into<String>, tokens: T) -> Self {
        Self {
            client: reqwest::Client::new(),
            bucket: bucket.into(),
            tokens,
            base_url: PUBLIC_HOST.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl<T: TokenSource + Send + Sync> ObjectStore for GcsStore<T> {
    async fn download(&self, name: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let url = format!(
            "{}/storage/v1/b/{}/o/{}?alt=media",
            self.base_url,
            self.bucket,
            urlencoding::encode(name)
        );
        let resp = self
            .client
            .get(url)
            .bearer_auth(self.tokens.token().await?)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, object = name, "Failed to download object"))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp
            .error_for_status()
            .with_context(|| format!("Failed to download gs://{}/{name}", self.bucket))?;

        Ok(Some(resp.bytes().await?.to_vec()))
    }

    async fn upload(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> anyhow::Result<()> {
        let url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.base_url,
            self.bucket,
            urlencoding::encode(name)
        );
        self.client
            .post(url)
            .bearer_auth(self.tokens.token().await?)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, object = name, "Failed to upload object"))?
            .error_for_status()
            .with_context(|| format!("Failed to upload gs://{}/{name}", self.bucket))?;

        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .get(format!("{}/storage/v1/b/{}/o", self.base_url, self.bucket))
                .bearer_auth(self.tokens.token().await?);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token)]);
            }

            let page = req
                .send()
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Failed to list bucket"))?
                .error_for_status()
                .with_context(|| format!("Failed to list gs://{}", self.bucket))?
                .json::<ListResponse>()
                .await?;

            names.extend(page.items.unwrap_or_default().into_iter().map(|o| o.name));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(names)
    }

    fn public_url(&self, name: &str) -> String {
        format!("{PUBLIC_HOST}/{}/{}", self.bucket, urlencoding::encode(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoToken;

    impl TokenSource for NoToken {
        async fn token(&self) -> anyhow::Result<String> {
            Ok("test-token".into())
        }
    }

    #[test]
    fn public_url_encodes_object_name() {
        let store = GcsStore::new("briefs", NoToken);
        assert_eq!(
            store.public_url("summary-2024-02-15.mp3"),
            "https://storage.googleapis.com/briefs/summary-2024-02-15.mp3"
        );
        assert_eq!(
            store.public_url("a b.mp3"),
            "https://storage.googleapis.com/briefs/a%20b.mp3"
        );
    }

    #[test]
    fn list_response_parses_empty_and_paged_bodies() {
        let empty: ListResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.items.is_none());
        assert!(empty.next_page_token.is_none());

        let paged: ListResponse = serde_json::from_str(
            r#"{"items": [{"name": "summary-2024-01-01.mp3"}], "nextPageToken": "tok"}"#,
        )
        .unwrap();
        assert_eq!(paged.items.unwrap()[0].name, "summary-2024-01-01.mp3");
        assert_eq!(paged.next_page_token.as_deref(), Some("tok"));
    }
}
