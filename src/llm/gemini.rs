//! Google Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::{brief_prompt, BriefGenerator, LlmConfig, LlmError};
use crate::models::{BriefRequest, CreativeBrief};

/// Gemini client for brief generation.
pub struct GeminiClient {
    config: LlmConfig,
    api_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

/// Structured output schema matching [`CreativeBrief`].
fn brief_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A professional summary of the project vision."
            },
            "moodBoardSuggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Visual style keywords."
            },
            "estimatedTimeline": {
                "type": "STRING",
                "description": "Estimated duration of the project."
            },
            "technicalRequirements": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Technical needs."
            }
        },
        "required": [
            "summary",
            "moodBoardSuggestions",
            "estimatedTimeline",
            "technicalRequirements"
        ]
    })
}

impl GeminiClient {
    /// Create a client. Fails with [`LlmError::Disabled`] or
    /// [`LlmError::NotConfigured`] when the config cannot be used.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if !config.enabled {
            return Err(LlmError::Disabled);
        }
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::NotConfigured)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Call `generateContent` and return the concatenated candidate text.
    async fn call_gemini(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: "application/json",
                response_schema: brief_schema(),
            },
        };

        let resp = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(LlmError::Api(format!("HTTP {}: {}", status, message)));
        }

        let gemini_resp: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        if let Some(err) = gemini_resp.error {
            return Err(LlmError::Api(err.message));
        }

        let text: String = gemini_resp
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Strip a Markdown code fence the model sometimes wraps JSON in.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn parse_brief(text: &str) -> Result<CreativeBrief, LlmError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| LlmError::Parse(e.to_string()))
}

#[async_trait]
impl BriefGenerator for GeminiClient {
    async fn generate_brief(&self, request: &BriefRequest) -> Result<CreativeBrief, LlmError> {
        let prompt = brief_prompt(
            &request.client_name,
            &request.project_type,
            &request.description,
        );

        debug!(
            "Generating brief for {} with {}",
            request.client_name, self.config.model
        );
        let text = self.call_gemini(&prompt).await.map_err(|e| {
            error!("Brief generation failed: {}", e);
            e
        })?;
        let brief = parse_brief(&text)?;

        info!("Generated brief for {}", request.client_name);
        Ok(brief)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, routing::post, Json, Router};

    fn request() -> BriefRequest {
        BriefRequest {
            client_name: "Acme".to_string(),
            project_type: "Music video".to_string(),
            description: "Neon, night city".to_string(),
        }
    }

    fn config(endpoint: &str) -> LlmConfig {
        LlmConfig {
            api_key: Some("test-key".to_string()),
            endpoint: endpoint.to_string(),
            ..LlmConfig::default()
        }
    }

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_new_requires_key() {
        assert!(matches!(
            GeminiClient::new(LlmConfig::default()),
            Err(LlmError::NotConfigured)
        ));
    }

    #[test]
    fn test_generate_url() {
        let client = GeminiClient::new(config("https://example.test/")).unwrap();
        assert_eq!(
            client.generate_url(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_parse_brief() {
        let brief = parse_brief(
            r#"{"summary":"s","moodBoardSuggestions":["neon"],"estimatedTimeline":"2 weeks","technicalRequirements":["Color grading"]}"#,
        )
        .unwrap();
        assert_eq!(brief.mood_board_suggestions, vec!["neon"]);
        assert!(matches!(parse_brief("not json"), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_request_shape() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.5,
                max_output_tokens: 10,
                response_mime_type: "application/json",
                response_schema: brief_schema(),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 10);
        assert_eq!(
            value["generationConfig"]["responseSchema"]["required"][1],
            "moodBoardSuggestions"
        );
    }

    #[tokio::test]
    async fn test_generate_brief_against_stub() {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["x-goog-api-key"], "test-key");
                let prompt = body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                assert!(prompt.contains("Acme"));
                let brief = json!({
                    "summary": "A neon-soaked music video.",
                    "moodBoardSuggestions": ["neon", "rain"],
                    "estimatedTimeline": "3 weeks",
                    "technicalRequirements": ["Night shoot"]
                });
                Json(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": brief.to_string() }] }
                    }]
                }))
            }),
        );
        let base = spawn(app).await;

        let client = GeminiClient::new(config(&base)).unwrap();
        let brief = client.generate_brief(&request()).await.unwrap();
        assert_eq!(brief.estimated_timeline, "3 weeks");
        assert_eq!(brief.mood_board_suggestions, vec!["neon", "rain"]);
    }

    #[tokio::test]
    async fn test_generate_brief_upstream_error() {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(|| async {
                (
                    axum::http::StatusCode::FORBIDDEN,
                    Json(json!({ "error": { "message": "API key not valid" } })),
                )
            }),
        );
        let base = spawn(app).await;

        let client = GeminiClient::new(config(&base)).unwrap();
        match client.generate_brief(&request()).await {
            Err(LlmError::Api(msg)) => assert!(msg.contains("API key not valid")),
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_brief_empty_candidates() {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let base = spawn(app).await;

        let client = GeminiClient::new(config(&base)).unwrap();
        assert!(matches!(
            client.generate_brief(&request()).await,
            Err(LlmError::EmptyResponse)
        ));
    }
}
