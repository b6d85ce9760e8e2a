use serde_json::Value;

use crate::error::ExtractError;
use crate::{links, message, resolver, source};

/// Run the full extraction pipeline over an email source (URL or file path).
///
/// Returns `Ok(Some(value))` once a JSON payload is found, `Ok(None)` when
/// the email holds no extractable JSON, and an error only for the fatal
/// cases: unreachable source, unparseable message, or a ".json" attachment
/// that turns out not to contain JSON.
pub async fn extract_json(email_source: &str) -> Result<Option<Value>, ExtractError> {
    let raw = source::fetch_content(email_source).await?;
    let mail = message::parse(&raw)?;

    // A JSON attachment always wins over links, and unlike a link it is
    // expected to be well-formed: a parse failure here is fatal.
    if let Some(attachment) = mail.attachments.iter().find(|a| a.is_json()) {
        tracing::debug!(filename = %attachment.filename, "found JSON attachment");
        let value = serde_json::from_slice(&attachment.content)
            .map_err(|e| ExtractError::InvalidAttachmentJson(e.to_string()))?;
        return Ok(Some(value));
    }

    let candidates = links::extract_links(&mail.body);
    tracing::debug!(count = candidates.len(), "trying candidate links");
    for link in &candidates {
        if let Some(value) = resolver::resolve(link, 0).await {
            return Ok(Some(value));
        }
    }

    Ok(None)
}
