//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → HTTP → テキスト抽出）を提供します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// プロンプトを送信して応答テキストを取得
    ///
    /// 応答にテキストが無い場合は空文字列を返す（代替文の差し込みは呼び出し側の責務）。
    pub fn query(&self, prompt: &str) -> Result<String, Error> {
        let payload = self.provider.make_request_payload(prompt)?;
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;
        let response_json = self.provider.make_http_request(&request_json)?;
        let text = self.provider.parse_response_text(&response_json)?;
        Ok(text.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    // モックプロバイダ
    struct MockProvider {
        response: &'static str,
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-1"
        }

        fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
            Ok(serde_json::json!({ "prompt": prompt }))
        }

        fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
            assert!(request_json.contains("prompt"));
            Ok(self.response.to_string())
        }

        fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
            let v: Value = serde_json::from_str(response_json)?;
            Ok(v["text"].as_str().map(|s| s.to_string()))
        }
    }

    #[test]
    fn test_llm_driver_query() {
        let driver = LlmDriver::new(MockProvider {
            response: r#"{"text":"Hello, world!"}"#,
        });
        assert_eq!(driver.query("test").unwrap(), "Hello, world!");
    }

    #[test]
    fn test_llm_driver_query_without_text_is_empty() {
        let driver = LlmDriver::new(MockProvider { response: "{}" });
        assert_eq!(driver.query("test").unwrap(), "");
    }

    #[test]
    fn test_llm_driver_query_bad_json_is_error() {
        let driver = LlmDriver::new(MockProvider { response: "not json" });
        assert!(matches!(driver.query("test"), Err(Error::Json(_))));
    }
}
