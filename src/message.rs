use mailparse::{DispositionType, ParsedMail};

use crate::error::ExtractError;

/// An email reduced to what the extraction pipeline needs: its named
/// attachments in declared order and one decoded body string.
#[derive(Debug)]
pub struct ParsedEmail {
    pub attachments: Vec<Attachment>,
    pub body: String,
}

#[derive(Debug)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn is_json(&self) -> bool {
        self.filename.to_lowercase().ends_with(".json")
    }
}

pub fn parse(raw: &[u8]) -> Result<ParsedEmail, ExtractError> {
    let mail =
        mailparse::parse_mail(raw).map_err(|e| ExtractError::MalformedMessage(e.to_string()))?;

    let mut attachments = Vec::new();
    let mut text_body: Option<String> = None;
    let mut html_body: Option<String> = None;
    walk_parts(&mail, &mut attachments, &mut text_body, &mut html_body)?;

    // Prefer the plain-text part for link scanning, fall back to HTML, and
    // for non-multipart messages to the decoded top-level body.
    let body = match text_body.or(html_body) {
        Some(body) => body,
        None => mail.get_body().unwrap_or_default(),
    };

    Ok(ParsedEmail { attachments, body })
}

fn walk_parts(
    part: &ParsedMail<'_>,
    attachments: &mut Vec<Attachment>,
    text_body: &mut Option<String>,
    html_body: &mut Option<String>,
) -> Result<(), ExtractError> {
    if part.subparts.is_empty() {
        let disposition = part.get_content_disposition();
        let filename = disposition.params.get("filename").cloned();
        let is_attachment =
            disposition.disposition == DispositionType::Attachment && filename.is_some();

        if is_attachment {
            let content = part
                .get_body_raw()
                .map_err(|e| ExtractError::MalformedMessage(e.to_string()))?;
            attachments.push(Attachment {
                filename: filename.unwrap_or_default(),
                content,
            });
            return Ok(());
        }

        let ctype = part.ctype.mimetype.to_lowercase();
        if ctype == "text/plain" && text_body.is_none() {
            if let Ok(body) = part.get_body() {
                *text_body = Some(body);
            }
        } else if ctype == "text/html" && html_body.is_none() {
            if let Ok(body) = part.get_body() {
                *html_body = Some(body);
            }
        }
        return Ok(());
    }

    for sub in &part.subparts {
        walk_parts(sub, attachments, text_body, html_body)?;
    }
    Ok(())
}
