use crate::api::BackendClient;
use crate::controller::ChatController;
use crate::document::extract_pdf;
use crate::error::Result;
use crate::models::Message;
use std::path::Path;
use tracing::warn;

/// One user-facing chat: the controller's session state wired to the
/// backend and the PDF extractor.
pub struct ChatSession {
    controller: ChatController,
    backend: BackendClient,
}

impl ChatSession {
    pub fn new(controller: ChatController, backend: BackendClient) -> Self {
        Self {
            controller,
            backend,
        }
    }

    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ChatController {
        &mut self.controller
    }

    /// Ask the backend and record both sides of the exchange.
    ///
    /// Returns `Ok(None)` for blank input. A failed request is recorded as a
    /// system message before the error is returned.
    pub async fn send(&mut self, question: &str) -> Result<Option<String>> {
        if question.trim().is_empty() {
            return Ok(None);
        }

        self.controller.append_message(Message::user(question));

        match self.backend.ask(question).await {
            Ok(answer) => {
                self.controller.append_message(Message::bot(answer.clone()));
                Ok(Some(answer))
            }
            Err(e) => {
                warn!("ask failed: {}", e);
                self.controller.append_message(Message::system(format!(
                    "Error: Failed to get response. {}",
                    e
                )));
                Err(e)
            }
        }
    }

    /// Extract `path`, attach it to the session and index it on the backend.
    ///
    /// Extraction failures leave the session untouched. If only the upload
    /// fails, the document stays attached locally.
    pub async fn upload(&mut self, path: &Path) -> Result<String> {
        let document = extract_pdf(path)?;
        self.controller
            .set_document(document.name.clone(), document.text.clone());

        self.backend.upload_document(&document.text).await?;

        self.controller.append_message(Message::system(format!(
            "Successfully processed PDF: {}",
            document.name
        )));
        Ok(document.name)
    }

    /// Detach the document locally, then clear the backend index.
    pub async fn clear(&mut self) -> Result<()> {
        self.controller.clear_document();
        self.backend.clear_document().await?;
        self.controller
            .append_message(Message::system("PDF context cleared"));
        Ok(())
    }
}
