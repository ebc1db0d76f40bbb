use crate::config::ProviderSettings;
use crate::domain::ports::CompletionProvider;
use crate::utils::error::{ForgeError, GenerationError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Gemini `generateContent`，以 responseSchema 約束輸出為 JSON
#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    http: Client,
}

impl GeminiProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ForgeError::ConfigError {
            message: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            api_key: settings.api_key.clone().unwrap_or_default(),
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> std::result::Result<Url, GenerationError> {
        let model = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        let url = format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        );
        Url::parse(&url).map_err(|e| GenerationError::Transport {
            detail: format!("invalid Gemini endpoint URL {url}: {e}"),
        })
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn submit(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> std::result::Result<Option<String>, GenerationError> {
        let url = self.endpoint()?;
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    thought: None,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.clone(),
            },
        };

        tracing::debug!("Sending generateContent request to model {}", self.model);
        let resp = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        tracing::debug!("Gemini API response status: {}", status);

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, body);
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message);
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let data: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Transport {
                detail: format!("invalid response envelope from Gemini API: {e}"),
            })?;

        if data.candidates.is_empty() {
            tracing::warn!(
                "Gemini returned no candidates (prompt feedback: {:?})",
                data.prompt_feedback
            );
        }

        Ok(data.text())
    }
}

// Wire types

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// 第一個 candidate 的文字 (略過 thought parts)；沒有文字時回傳 None
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(model: &str, base_url: &str) -> ProviderSettings {
        ProviderSettings {
            api_key: Some("k".to_string()),
            model: model.to_string(),
            base_url: base_url.to_string(),
            timeout_seconds: None,
        }
    }

    #[test]
    fn test_endpoint_adds_models_prefix() {
        let provider =
            GeminiProvider::new(&settings("gemini-3-pro-preview", "https://example.com/v1beta/"))
                .unwrap();
        assert_eq!(
            provider.endpoint().unwrap().as_str(),
            "https://example.com/v1beta/models/gemini-3-pro-preview:generateContent"
        );

        let prefixed =
            GeminiProvider::new(&settings("models/custom", "https://example.com/v1beta")).unwrap();
        assert_eq!(
            prefixed.endpoint().unwrap().as_str(),
            "https://example.com/v1beta/models/custom:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some("hello".to_string()),
                    thought: None,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: serde_json::json!({"type": "OBJECT"}),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0], serde_json::json!({"text": "hello"}));
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_response_text_extraction() {
        let data: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "thinking...", "thought": true},
                        {"text": "{\"title\":"},
                        {"text": "\"X\"}"}
                    ]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(data.text().as_deref(), Some("{\"title\":\"X\"}"));

        let empty: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        assert_eq!(empty.text(), None);

        let no_content: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": [{"finishReason": "SAFETY"}]}))
                .unwrap();
        assert_eq!(no_content.text(), None);
    }
}
