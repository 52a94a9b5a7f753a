use crate::api::models::{AskRequest, AskResponse, DocumentRequest, ErrorBody, StatusResponse};
use crate::config::Config;
use crate::error::{ChatError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// Shown when the backend replies without an answer.
pub const NO_ANSWER_FALLBACK: &str = "Sorry, I could not find an answer.";

/// Client for the question-answering backend.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.backend_url,
            Duration::from_secs(config.request_timeout),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Ask a question about the indexed document.
    pub async fn ask(&self, question: &str) -> Result<String> {
        debug!("POST /ask ({} chars)", question.len());
        let response = self
            .http
            .post(self.endpoint("ask"))
            .json(&AskRequest { question })
            .send()
            .await?;
        let response = check_status(response).await?;

        let body: AskResponse = response.json().await?;
        Ok(body
            .answer
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| NO_ANSWER_FALLBACK.to_string()))
    }

    /// Send extracted document text to be indexed.
    pub async fn upload_document(&self, text: &str) -> Result<()> {
        debug!("POST /upload_pdf ({} chars)", text.len());
        let response = self
            .http
            .post(self.endpoint("upload_pdf"))
            .json(&DocumentRequest { text })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Drop the backend's document index.
    pub async fn clear_document(&self) -> Result<()> {
        debug!("POST /clear_pdf");
        let response = self.http.post(self.endpoint("clear_pdf")).send().await?;
        let response = check_status(response).await?;

        // The backend reports clear failures in a 200 body.
        let body: StatusResponse = response.json().await.unwrap_or_default();
        if body.status.as_deref() == Some("error") {
            return Err(ChatError::Other(format!(
                "Failed to clear PDF context on backend: {}",
                body.message.unwrap_or_default()
            )));
        }
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .map(|body| match body.detail {
            serde_json::Value::String(detail) => detail,
            other => other.to_string(),
        })
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback);

    Err(ChatError::ApiError {
        status: status.as_u16(),
        message,
    })
}
