use serde::Serialize;
use serde_json::Value;

use std::time::Duration;

use crate::config;

/// Request body for the Gemini `generateContent` endpoint.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("failed to reach Gemini: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },
}

pub struct GeminiClient {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(cfg: config::Gemini) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        GeminiClient {
            api_url: cfg.api_url,
            api_key: cfg.api_key,
            client,
        }
    }

    /// Send the prompt to the configured endpoint and return the raw
    /// response body. Non-2xx responses carry the provider's body text.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
        };

        tracing::debug!("Sending generation request to {}", self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!("Gemini request failed with status {}", status);
            return Err(GeminiError::Provider { status, body: text });
        }

        Ok(text)
    }
}

/// Pull the generated text out of a raw Gemini response body.
///
/// Navigation is defensive: any missing or mistyped step along
/// `candidates[0].content.parts[0].text` degrades to a fallback sentence,
/// and only invalid JSON is reported as a parse error.
pub fn extract_reply_text(response: &str) -> String {
    let root: Value = match serde_json::from_str(response) {
        Ok(value) => value,
        Err(e) => return format!("Error parsing Gemini response: {}", e),
    };

    root.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| "No valid response from Gemini.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_well_formed_response() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello there"}]}}]}"#;
        assert_eq!(extract_reply_text(body), "Hello there");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let out = extract_reply_text("{not json");
        assert!(out.starts_with("Error parsing Gemini response:"));
    }

    #[test]
    fn missing_candidates_degrades_to_fallback() {
        assert_eq!(extract_reply_text("{}"), "No valid response from Gemini.");
    }

    #[test]
    fn empty_candidates_degrades_to_fallback() {
        assert_eq!(
            extract_reply_text(r#"{"candidates":[]}"#),
            "No valid response from Gemini."
        );
    }

    #[test]
    fn non_array_candidates_degrades_to_fallback() {
        assert_eq!(
            extract_reply_text(r#"{"candidates":"nope"}"#),
            "No valid response from Gemini."
        );
    }

    #[test]
    fn missing_text_degrades_to_fallback() {
        assert_eq!(
            extract_reply_text(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#),
            "No valid response from Gemini."
        );
    }

    #[test]
    fn non_string_text_degrades_to_fallback() {
        assert_eq!(
            extract_reply_text(r#"{"candidates":[{"content":{"parts":[{"text":42}]}}]}"#),
            "No valid response from Gemini."
        );
    }

    #[test]
    fn request_body_matches_the_provider_shape() {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}]
            })
        );
    }
}
