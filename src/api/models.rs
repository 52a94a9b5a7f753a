use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

#[derive(Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Serialize)]
pub struct DocumentRequest<'a> {
    pub text: &'a str,
}

/// Body of `/upload_pdf` and `/clear_pdf` replies.
#[derive(Deserialize, Default)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// FastAPI error body.
#[derive(Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}
