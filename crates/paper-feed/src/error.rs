//! Error types for the paper feed client.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Fallback text shown when a save fails without a server message.
pub const SAVE_FAILED_MESSAGE: &str = "An error occurred while saving the paper.";

/// Text shown when writing to the clipboard fails.
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy paper ID. Please try again.";

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-success status (list fetch, or a save whose body is unusable)
    #[error("HTTP error! status: {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },
}

impl ClientError {
    /// Create a status error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status { status, body: body.into() }
    }

    /// HTTP status code, when the server answered.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from the clipboard seam.
#[derive(thiserror::Error, Debug)]
pub enum ClipboardError {
    /// No clipboard helper program could be found
    #[error("No clipboard provider available (tried: {tried})")]
    Unavailable {
        /// Comma-separated list of helpers that were tried
        tried: String,
    },

    /// The helper ran but reported failure
    #[error("Clipboard provider `{program}` failed: {message}")]
    Provider {
        /// Helper program name
        program: String,
        /// Exit status or stderr
        message: String,
    },

    /// I/O error talking to the helper
    #[error("Clipboard I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipboardError {
    /// Create a provider error.
    #[must_use]
    pub fn provider(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider { program: program.into(), message: message.into() }
    }
}

/// Errors from a user action (save or copy).
#[derive(thiserror::Error, Debug)]
pub enum ActionError {
    /// The request never produced a usable answer
    #[error("Request failed: {0}")]
    Client(#[from] ClientError),

    /// The server answered and reported failure
    #[error("Save rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// Message supplied by the server, if any
        message: Option<String>,
    },

    /// Clipboard write failed
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

impl ActionError {
    /// Create a rejection error.
    #[must_use]
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected { message }
    }

    /// Convert to the message shown to the user.
    ///
    /// A non-empty server message wins; everything else maps to the fixed
    /// fallback text for the action.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Rejected { message: Some(message) } if !message.is_empty() => message.clone(),
            Self::Rejected { .. } | Self::Client(_) => SAVE_FAILED_MESSAGE.to_string(),
            Self::Clipboard(_) => COPY_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for user actions.
pub type ActionResult<T> = Result<T, ActionError>;
