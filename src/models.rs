use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ParseEmailRequest {
    pub email_source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
