pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid private key: {0}")]
    Decode(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Request to {url} failed{}: {body}", .status.map(|s| format!(" with status {}", s)).unwrap_or_default())]
    UpstreamHttp {
        url: String,
        status: Option<u16>,
        body: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        AppError::Upstream(message.into())
    }

    /// True for errors caused by the caller's input, which never reach an upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::Decode(_))
    }
}
