use thiserror::Error;

/// Fatal failures of the extraction pipeline. Per-link fetch and parse
/// problems are not represented here; the resolver swallows those and moves
/// on to the next candidate.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Error reading email file: no such file: {0}")]
    FileNotFound(String),
    #[error("Permission denied reading email file: {0}")]
    PermissionDenied(String),
    #[error("Email source is unreachable: {0}")]
    SourceUnreachable(String),
    #[error("Network error while fetching email from URL: {0}")]
    Network(String),
    #[error("Error fetching email from URL: status {status}")]
    Fetch { status: u16 },
    #[error("Too many redirects while fetching email from URL (limit {0})")]
    TooManyRedirects(usize),
    #[error("Failed to parse email message: {0}")]
    MalformedMessage(String),
    #[error("Invalid JSON in attachment: {0}")]
    InvalidAttachmentJson(String),
}
