use std::io::ErrorKind;
use std::time::Duration;

use url::Url;

use crate::error::ExtractError;

const USER_AGENT: &str = "email-json-extractor/1.0";
const MAX_REDIRECTS: usize = 10;

/// Retrieve the raw email bytes for a source string, which is either an
/// http(s) URL or a local file path. Anything without an http(s) scheme is
/// treated as a path.
pub async fn fetch_content(source: &str) -> Result<Vec<u8>, ExtractError> {
    if is_url(source) {
        fetch_from_url(source).await
    } else {
        fetch_from_file(source)
    }
}

fn is_url(source: &str) -> bool {
    Url::parse(source)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// GET the URL, following redirects by hand so the chain length stays
/// bounded even against a malicious Location loop.
async fn fetch_from_url(url: &str) -> Result<Vec<u8>, ExtractError> {
    let client = reqwest::ClientBuilder::new()
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ExtractError::Network(e.to_string()))?;

    let mut current = url.to_string();
    for _ in 0..=MAX_REDIRECTS {
        let response = client.get(&current).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ExtractError::Network(e.to_string())
            } else {
                ExtractError::SourceUnreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or(ExtractError::Fetch {
                    status: status.as_u16(),
                })?;
            // Location may be relative; resolve it against the current URL.
            current = match Url::parse(&current).and_then(|base| base.join(location)) {
                Ok(next) => next.to_string(),
                Err(_) => location.to_string(),
            };
            tracing::debug!(next = %current, "following redirect");
            continue;
        }
        if !status.is_success() {
            return Err(ExtractError::Fetch {
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| ExtractError::Network(e.to_string()))?;
        return Ok(body.to_vec());
    }

    Err(ExtractError::TooManyRedirects(MAX_REDIRECTS))
}

fn fetch_from_file(path: &str) -> Result<Vec<u8>, ExtractError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ExtractError::FileNotFound(path.to_string()),
        ErrorKind::PermissionDenied => ExtractError::PermissionDenied(path.to_string()),
        _ => ExtractError::SourceUnreachable(e.to_string()),
    })
}
