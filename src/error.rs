use std::fmt;

#[derive(Debug)]
pub enum ChatError {
    ApiError {
        status: u16,
        message: String,
    },
    ConfigError(String),
    StorageError(String),
    InvalidDocument(String),
    NoIdentity,
    NetworkError(reqwest::Error),
    IoError(std::io::Error),
    PdfError(lopdf::Error),
    Other(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::ApiError { status, message } => {
                write!(f, "Backend error (status {}): {}", status, message)
            }
            ChatError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ChatError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            ChatError::InvalidDocument(msg) => write!(f, "Invalid document: {}", msg),
            ChatError::NoIdentity => write!(
                f,
                "No user identity available; pass --user or set PDFCHAT_USER"
            ),
            ChatError::NetworkError(e) => write!(f, "Network error: {}", e),
            ChatError::IoError(e) => write!(f, "IO error: {}", e),
            ChatError::PdfError(e) => write!(f, "PDF error: {}", e),
            ChatError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::NetworkError(e) => Some(e),
            ChatError::IoError(e) => Some(e),
            ChatError::PdfError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::NetworkError(err)
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        ChatError::IoError(err)
    }
}

impl From<lopdf::Error> for ChatError {
    fn from(err: lopdf::Error) -> Self {
        ChatError::PdfError(err)
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
