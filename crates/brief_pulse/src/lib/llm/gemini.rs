use reqwest::Client;
use serde::Deserialize;

use crate::Summarizer;

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Response contained no candidate text")]
    EmptyResponse,
}

impl GeminiClient {
    const SUMMARY_PROMPT: &'static str = include_str!("./prompts/summarize_0.txt");

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_generate_request(
        &self,
        model_name: &str,
        prompt: impl Into<String>,
    ) -> Result<GenerateResponse, GeminiError> {
        let body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt.into() }
                    ]
                }
            ]
        });

        let resp = self
            .client
            .post(format!(
                "{}/models/{model_name}:generateContent",
                self.base_url
            ))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, message });
        }

        Ok(resp.json::<GenerateResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl Summarizer for GeminiClient {
    const SUMMARIZER_MODEL: &'static str = "gemini-2.5-pro";

    type Error = GeminiError;

    async fn summarize(&self, title: &str, content: &str) -> Result<String, Self::Error> {
        let prompt = format!(
            "{}\nArticle to summarize:\nTitle: {title}\nContent: {content}",
            Self::SUMMARY_PROMPT
        );

        let response = self
            .send_generate_request(Self::SUMMARIZER_MODEL, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        let text = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<String>();

        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        Ok(text.trim().to_string())
    }
}
