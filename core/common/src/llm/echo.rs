//! Echoプロバイダの実装
//!
//! このプロバイダは実際にAPIを呼び出さず、固定の解釈文を返します。
//! API キー無しでの動作確認やテスト用に使用します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo"
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        Ok(json!({ "prompt": prompt }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // 実際の API 呼び出しは行わず、受け取ったプロンプトの末尾行を返す
        let v: Value = serde_json::from_str(request_json)?;
        let prompt = v["prompt"].as_str().unwrap_or_default();
        let last_line = prompt.lines().last().unwrap_or_default();
        Ok(json!({ "text": format!("[Echo Provider] {}", last_line) }).to_string())
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)?;
        Ok(v["text"].as_str().map(|s| s.to_string()))
    }
}
