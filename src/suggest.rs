//! Optional format suggestions from a generative model. Best effort only:
//! every failure is logged and turns into "no suggestions".

use crate::config::SuggestionConfig;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

pub const MAX_SUGGESTIONS: usize = 4;

#[derive(Debug, Error)]
enum SuggestError {
    #[error("suggestions are disabled")]
    Disabled,

    #[error("API key is missing")]
    MissingKey,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered {0}")]
    Status(StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestionPayload {
    #[serde(default)]
    suggestions: Vec<String>,
}

#[derive(Clone)]
pub struct SuggestionClient {
    http: reqwest::Client,
    enabled: bool,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl SuggestionClient {
    pub fn new(config: &SuggestionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            enabled: config.enabled,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }

    /// Extra output formats for a file type, uppercased, at most
    /// [`MAX_SUGGESTIONS`]. Never fails; an empty list means "use the
    /// catalog as is".
    pub async fn suggest(&self, mime_type: &str, extension: &str) -> Vec<String> {
        match self.try_suggest(mime_type, extension).await {
            Ok(suggestions) => {
                debug!(
                    "Suggested formats for .{} ({}): {:?}",
                    extension, mime_type, suggestions
                );
                suggestions
            }
            Err(SuggestError::Disabled) => Vec::new(),
            Err(SuggestError::MissingKey) => {
                error!("Cannot call suggestion service: API key is missing.");
                Vec::new()
            }
            Err(e) => {
                warn!("Error fetching format suggestions: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_suggest(
        &self,
        mime_type: &str,
        extension: &str,
    ) -> Result<Vec<String>, SuggestError> {
        if !self.enabled {
            return Err(SuggestError::Disabled);
        }
        let api_key = self.api_key.as_deref().ok_or(SuggestError::MissingKey)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        let body = request_body(&build_prompt(mime_type, extension));

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SuggestError::Status(response.status()));
        }

        let reply: GenerateContentResponse = response.json().await?;
        parse_suggestions(reply)
    }
}

pub fn build_prompt(mime_type: &str, extension: &str) -> String {
    format!(
        "Given an input file with MIME type \"{}\" and extension \".{}\", suggest up to {} common and logical file formats to convert it to. Prioritize formats that are widely used for this file type.",
        mime_type,
        extension.trim_start_matches('.').to_lowercase(),
        MAX_SUGGESTIONS
    )
}

fn request_body(prompt: &str) -> serde_json::Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "suggestions": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "An array of suggested file format extensions, e.g., [\"PDF\", \"DOCX\"]."
                    }
                }
            }
        }
    })
}

fn parse_suggestions(reply: GenerateContentResponse) -> Result<Vec<String>, SuggestError> {
    let text: String = reply
        .candidates
        .into_iter()
        .next()
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(SuggestError::Malformed("empty response".to_string()));
    }

    let payload: SuggestionPayload =
        serde_json::from_str(text).map_err(|e| SuggestError::Malformed(e.to_string()))?;

    Ok(payload
        .suggestions
        .into_iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;
    use tokio::net::TcpListener;

    fn reply_with_text(text: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .unwrap()
    }

    fn config(endpoint: &str, api_key: Option<&str>) -> SuggestionConfig {
        SuggestionConfig {
            enabled: true,
            endpoint: endpoint.to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: api_key.map(String::from),
        }
    }

    #[test]
    fn prompt_embeds_type_and_extension() {
        let prompt = build_prompt("image/heic", "HEIC");
        assert!(prompt.contains("MIME type \"image/heic\""));
        assert!(prompt.contains("extension \".heic\""));
        assert!(prompt.contains("up to 4"));
    }

    #[test]
    fn parses_and_uppercases() {
        let parsed =
            parse_suggestions(reply_with_text(r#"{"suggestions":["jpg"," png ","","webp","pdf","gif"]}"#))
                .unwrap();
        assert_eq!(parsed, vec!["JPG", "PNG", "WEBP", "PDF"]);
    }

    #[test]
    fn empty_or_garbled_text_is_malformed() {
        assert!(matches!(
            parse_suggestions(GenerateContentResponse::default()),
            Err(SuggestError::Malformed(_))
        ));
        assert!(matches!(
            parse_suggestions(reply_with_text("not json")),
            Err(SuggestError::Malformed(_))
        ));
    }

    #[test]
    fn payload_without_suggestions_is_empty() {
        assert!(parse_suggestions(reply_with_text("{}")).unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_key_yields_nothing() {
        let client = SuggestionClient::new(&config("http://127.0.0.1:9", None));
        assert!(!client.is_available());
        assert!(client.suggest("image/png", "png").await.is_empty());
    }

    #[tokio::test]
    async fn disabled_yields_nothing() {
        let mut cfg = config("http://127.0.0.1:9", Some("key"));
        cfg.enabled = false;
        let client = SuggestionClient::new(&cfg);
        assert!(!client.is_available());
        assert!(client.suggest("image/png", "png").await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_service_yields_nothing() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SuggestionClient::new(&config(&format!("http://{}", addr), Some("key")));
        assert!(client.suggest("image/png", "png").await.is_empty());
    }

    #[tokio::test]
    async fn error_status_yields_nothing() {
        let (url, server) = serve_once("/", "403 Forbidden", r#"{"error":{"code":403}}"#).await;
        let client = SuggestionClient::new(&config(url.as_str(), Some("key")));
        assert!(client.suggest("image/png", "png").await.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn calls_generate_content_with_key() {
        let (url, server) = serve_once(
            "/",
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"suggestions\":[\"jpg\",\"webp\"]}"}]}}]}"#,
        )
        .await;
        let client = SuggestionClient::new(&config(url.as_str(), Some("secret")));

        let suggestions = client.suggest("image/heic", "heic").await;
        assert_eq!(suggestions, vec!["JPG", "WEBP"]);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent"));
        assert!(request.to_lowercase().contains("x-goog-api-key: secret"));
        assert!(request.contains("responseMimeType"));
    }
}
