//! Gemini `generateContent` client.

use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("AI service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("AI service returned an empty reply")]
    EmptyReply,
    #[error("invalid base64 image: {0}")]
    Image(#[from] base64::DecodeError),
    #[error("invalid AI client configuration: {0}")]
    Config(String),
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    key_length: usize,
}

impl GeminiClient {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> Result<Self, GenAiError> {
        let mut key = HeaderValue::from_str(api_key).map_err(|e| GenAiError::Config(e.to_string()))?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);

        let client = Client::builder().default_headers(headers).timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/v1beta/models/{}:generateContent", base_url.trim_end_matches('/'), model),
            key_length: api_key.len(),
        })
    }

    pub fn key_length(&self) -> usize {
        self.key_length
    }

    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError> {
        self.generate(vec![json!({ "text": prompt })]).await
    }

    pub async fn generate_with_image(&self, prompt: &str, image: &[u8]) -> Result<String, GenAiError> {
        let parts = vec![
            json!({ "text": prompt }),
            json!({
                "inline_data": {
                    "mime_type": sniff_mime(image),
                    "data": base64::engine::general_purpose::STANDARD.encode(image),
                }
            }),
        ];
        self.generate(parts).await
    }

    async fn generate(&self, parts: Vec<Value>) -> Result<String, GenAiError> {
        let body = json!({ "contents": [{ "parts": parts }] });
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Status { status: status.as_u16(), body });
        }

        let reply: GenerateResponse = response.json().await?;
        reply_text(reply).ok_or(GenAiError::EmptyReply)
    }
}

fn reply_text(reply: GenerateResponse) -> Option<String> {
    let content = reply.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Decode a base64 image, accepting an optional `data:<mime>;base64,` prefix.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, GenAiError> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    Ok(base64::engine::general_purpose::STANDARD.decode(payload.trim())?)
}

/// MIME type from magic bytes; JPEG when unrecognised.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(b"\x89PNG\r\n\x1a\nrest"), "image/png");
        assert_eq!(sniff_mime(b"GIF89a...."), "image/gif");
        assert_eq!(sniff_mime(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(sniff_mime(b""), "image/jpeg");
    }

    #[test]
    fn test_decode_image() {
        assert_eq!(decode_image("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_image("data:image/png;base64,aGVsbG8=").unwrap(), b"hello");
        assert!(matches!(decode_image("not base64!!"), Err(GenAiError::Image(_))));
    }

    #[test]
    fn test_reply_text_joins_parts() {
        let reply: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Hello "}, {"text": "there"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(reply_text(reply).as_deref(), Some("Hello there"));

        let empty: GenerateResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(reply_text(empty).is_none());

        let blank: GenerateResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]})).unwrap();
        assert!(reply_text(blank).is_none());
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new("k3y", "https://example.test/", "gemini-2.5-flash", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint, "https://example.test/v1beta/models/gemini-2.5-flash:generateContent");
        assert_eq!(client.key_length(), 3);
    }
}
