use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    /// Client-side precondition failed; no request was made.
    #[error("{0}")]
    EmptyInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Service error ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Service { status: u16, detail: Option<String> },

    #[error("A narration is already playing")]
    NarrationBusy,

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ReaderError: {0}")]
    Custom(String),
}

impl ReaderError {
    /// Text shown to the user in error dialogs.
    pub fn user_message(&self) -> String {
        match self {
            ReaderError::Service { detail: Some(detail), .. } => detail.clone(),
            ReaderError::Service { status, detail: None } => {
                format!("The service returned an error (status {})", status)
            }
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for ReaderError {
    fn from(error: std::io::Error) -> Self {
        ReaderError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for ReaderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ReaderError::Timeout(error.to_string())
        } else if let Some(status) = error.status() {
            ReaderError::Service { status: status.as_u16(), detail: None }
        } else if error.is_decode() {
            ReaderError::Custom(format!("Unexpected response from service: {error}"))
        } else {
            ReaderError::Network(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_detail_is_shown_verbatim() {
        let err = ReaderError::Service { status: 422, detail: Some("PDF is encrypted".into()) };
        assert_eq!(err.user_message(), "PDF is encrypted");

        let err = ReaderError::Service { status: 500, detail: None };
        assert!(err.user_message().contains("500"));
    }

    #[test]
    fn empty_input_message_is_plain() {
        let err = ReaderError::EmptyInput("No text available to generate quiz.".into());
        assert_eq!(err.user_message(), "No text available to generate quiz.");
    }
}
