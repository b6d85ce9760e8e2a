use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use scraper::{Html, Selector};
use serde_json::Value;

use crate::links::clean_link;

const USER_AGENT: &str = "email-json-extractor/1.0";

/// Fetch a candidate link and try to produce a JSON value from it.
///
/// A `application/json` response is parsed directly. A `text/html` response
/// gets one chance to redeem itself: its first anchor pointing at a ".json"
/// resource is followed, but only from depth 0, so an HTML page linking to
/// another HTML page ends the search for this candidate.
///
/// Every failure here is recoverable: network errors, bad status codes and
/// malformed JSON all map to `None` so the caller can try the next candidate.
pub fn resolve<'a>(
    link: &'a str,
    depth: u8,
) -> Pin<Box<dyn Future<Output = Option<Value>> + Send + 'a>> {
    Box::pin(async move {
        let response = match fetch(link).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(link, error = %e, "fetch failed, skipping candidate");
                return None;
            }
        };

        if response.content_type.contains("application/json") {
            return match serde_json::from_slice(&response.body) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(link, error = %e, "invalid JSON body, skipping candidate");
                    None
                }
            };
        }

        if response.content_type.contains("text/html") && depth == 0 {
            let html = String::from_utf8_lossy(&response.body);
            if let Some(nested) = extract_nested_json_link(&html) {
                tracing::debug!(link, nested, "following nested link");
                return resolve(&nested, depth + 1).await;
            }
        }

        None
    })
}

struct FetchResponse {
    content_type: String,
    body: Vec<u8>,
}

async fn fetch(link: &str) -> Result<FetchResponse, reqwest::Error> {
    let client = reqwest::ClientBuilder::new()
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()?;

    let response = client.get(link).send().await?.error_for_status()?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    let body = response.bytes().await?.to_vec();
    Ok(FetchResponse { content_type, body })
}

/// First `<a>` whose href ends in ".json", href normalized like any other
/// extracted link.
fn extract_nested_json_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"a[href$=".json"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(clean_link)
}
