//! Gemini プロバイダの実装（generateContent の単発呼び出し）

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};
use std::time::Duration;

/// 既定のモデル
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// 既定で API キーを読む環境変数
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// DEFAULT_API_KEY_ENV が無い時に参照する互換の環境変数
pub const LEGACY_API_KEY_ENV: &str = "EXPO_PUBLIC_GEMINI_API_KEY";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini プロバイダ
pub struct GeminiProvider {
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-1.5-flash"）
    /// * `api_key` - 解決済みの API キー
    /// * `timeout` - HTTP リクエスト全体のタイムアウト
    pub fn new(model: Option<String>, api_key: String, timeout: Duration) -> Result<Self, Error> {
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::system(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            model,
            api_key,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            BASE_URL, self.model, self.api_key
        )
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        Ok(json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .body(request_json.to_string())
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    Error::remote("Gemini API request timed out")
                } else {
                    // URL に API キーが含まれるため、reqwest のエラーから URL を外して表示する
                    Error::remote(format!("HTTP request failed: {}", e.without_url()))
                }
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::remote(format!("Failed to read response: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(Error::remote(format!(
                "Gemini API error: {}",
                error_message(status.as_u16(), &response_text)
            )));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::remote(format!("Gemini API error: {}", error_msg)));
        }

        let no_candidates = v["candidates"]
            .as_array()
            .map(|c| c.is_empty())
            .unwrap_or(true);
        if no_candidates {
            if let Some(reason) = v["promptFeedback"]["blockReason"].as_str() {
                return Err(Error::remote(format!(
                    "Gemini API error: prompt was blocked ({})",
                    reason
                )));
            }
        }

        // 先頭候補の text part をすべて結合する
        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<String>()
            })
            .filter(|s| !s.is_empty());

        Ok(text)
    }
}

/// エラーレスポンスからメッセージを抽出する（error.message が無ければ本文そのまま）
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(None, "test-key".to_string(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_default_model() {
        assert_eq!(provider().model(), DEFAULT_MODEL);
        assert_eq!(provider().name(), "gemini");
    }

    #[test]
    fn test_endpoint_contains_model_and_key() {
        let p = GeminiProvider::new(
            Some("gemini-1.5-pro".to_string()),
            "k".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        let url = p.endpoint();
        assert!(url.ends_with("/gemini-1.5-pro:generateContent?key=k"));
    }

    #[test]
    fn test_make_request_payload_single_user_turn() {
        let payload = provider().make_request_payload("Hello").unwrap();
        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "Hello");
    }

    #[test]
    fn test_parse_response_concatenates_text_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"Water "},{"text":"means change."}]}}]}"#;
        let text = provider().parse_response_text(json).unwrap();
        assert_eq!(text.as_deref(), Some("Water means change."));
    }

    #[test]
    fn test_parse_response_without_text_is_none() {
        let json = r#"{"candidates":[{"content":{"parts":[]}}]}"#;
        assert_eq!(provider().parse_response_text(json).unwrap(), None);
        let json = r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#;
        assert_eq!(provider().parse_response_text(json).unwrap(), None);
    }

    #[test]
    fn test_parse_response_error_object() {
        let json = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        let err = provider().parse_response_text(json).unwrap_err();
        assert!(matches!(err, Error::RemoteService(_)));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn test_parse_response_blocked_prompt() {
        let json = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let err = provider().parse_response_text(json).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_parse_response_invalid_json() {
        let err = provider().parse_response_text("<html>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(403, r#"{"error":{"message":"denied"}}"#),
            "denied"
        );
        assert_eq!(error_message(502, "bad gateway"), "HTTP 502: bad gateway");
    }
}
