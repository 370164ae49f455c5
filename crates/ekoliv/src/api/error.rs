use crate::session::StorageError;

/// Failures surfaced by backend calls. `Display` is the text shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("No response from server. Please check your connection.")]
    NoResponse,
    #[error("{0}")]
    Request(String),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

const FALLBACK_MESSAGE: &str = "An error occurred";

impl ApiError {
    /// Builds the error for a non-2xx response, preferring the body's
    /// `detail`, then `message`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| message_from_body(&value))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        Self::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Message for display, falling back to `fallback` when there is nothing
    /// better than the generic text.
    pub fn display_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.is_empty() || message == FALLBACK_MESSAGE {
            fallback.to_string()
        } else {
            message
        }
    }
}

fn message_from_body(value: &serde_json::Value) -> Option<String> {
    ["detail", "message"].iter().find_map(|key| match value.get(key)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) if text.is_empty() => None,
        serde_json::Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    })
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Request(format!("An unexpected error occurred: {err}"))
        } else {
            tracing::debug!(error = %err, "backend unreachable");
            Self::NoResponse
        }
    }
}
