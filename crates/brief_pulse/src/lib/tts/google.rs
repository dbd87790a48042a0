use base64::prelude::*;
use brief_store::TokenSource;
use reqwest::Client;
use serde::Deserialize;

use crate::SpeechSynthesizer;

/// Cloud Text-to-Speech over REST, fixed US-English studio voice, MP3 out.
pub struct GoogleTtsClient<T> {
    client: Client,
    tokens: T,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Auth error: {0}")]
    Auth(anyhow::Error),
    #[error("Audio payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

#[derive(Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

impl<T: TokenSource + Send + Sync> GoogleTtsClient<T> {
    const LANGUAGE_CODE: &'static str = "en-US";

    pub fn new(tokens: T) -> Self {
        Self {
            client: Client::new(),
            tokens,
            base_url: "https://texttospeech.googleapis.com".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl<T: TokenSource + Send + Sync> SpeechSynthesizer for GoogleTtsClient<T> {
    const VOICE_NAME: &'static str = "en-US-Studio-O";

    type Error = TtsError;

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, Self::Error> {
        let body = serde_json::json!({
            "input": { "text": text },
            "voice": {
                "languageCode": Self::LANGUAGE_CODE,
                "name": Self::VOICE_NAME
            },
            "audioConfig": { "audioEncoding": "MP3" }
        });

        let token = self.tokens.token().await.map_err(TtsError::Auth)?;

        let resp = self
            .client
            .post(format!("{}/v1/text:synthesize", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TtsError::Api { status, message });
        }

        let synthesized = resp.json::<SynthesizeResponse>().await?;
        Ok(BASE64_STANDARD.decode(synthesized.audio_content)?)
    }
}
