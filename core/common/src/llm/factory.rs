//! プロバイダファクトリー
//!
//! 解決済みの設定に基づいて適切なプロバイダを作成します。

use crate::error::Error;
use crate::llm::driver::LlmDriver;
use crate::llm::echo::EchoProvider;
use crate::llm::gemini::{GeminiProvider, DEFAULT_API_KEY_ENV, LEGACY_API_KEY_ENV};
use crate::llm::provider::LlmProvider;
use crate::llm::resolver::ResolvedProvider;
use crate::ports::outbound::EnvResolver;
use serde_json::Value;

/// API キーが見つからない時のメッセージ
pub const MISSING_API_KEY_MESSAGE: &str =
    "Gemini API key is not configured. Please add your API key to the .env file.";

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Google Gemini
    Gemini,
    /// Echo（API を呼ばずに固定応答）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Echo => "echo",
        }
    }

    /// 利用可能なプロバイダ名
    pub fn all_names() -> &'static [&'static str] {
        &["echo", "gemini"]
    }
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    Gemini(GeminiProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Gemini(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::Gemini(p) => p.model(),
            Self::Echo(p) => p.model(),
        }
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        match self {
            Self::Gemini(p) => p.make_request_payload(prompt),
            Self::Echo(p) => p.make_request_payload(prompt),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::Gemini(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::Gemini(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }
}

/// API キーを環境変数から解決する
///
/// `api_key_env` が指定されていればその変数のみ、無ければ GEMINI_API_KEY →
/// EXPO_PUBLIC_GEMINI_API_KEY の順に探す。見つからなければ `Error::Configuration`。
pub fn resolve_api_key(env: &dyn EnvResolver, api_key_env: Option<&str>) -> Result<String, Error> {
    let found = match api_key_env {
        Some(name) => env.var(name),
        None => env
            .var(DEFAULT_API_KEY_ENV)
            .or_else(|| env.var(LEGACY_API_KEY_ENV)),
    };
    found.ok_or_else(|| Error::configuration(MISSING_API_KEY_MESSAGE))
}

/// プロバイダを作成する
pub fn create_provider(
    resolved: &ResolvedProvider,
    env: &dyn EnvResolver,
) -> Result<AnyProvider, Error> {
    match resolved.provider_type {
        ProviderType::Gemini => {
            let api_key = resolve_api_key(env, resolved.api_key_env.as_deref())?;
            let provider = GeminiProvider::new(resolved.model.clone(), api_key, resolved.timeout)?;
            Ok(AnyProvider::Gemini(provider))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}

/// ドライバーを作成する
pub fn create_driver(
    resolved: &ResolvedProvider,
    env: &dyn EnvResolver,
) -> Result<LlmDriver<AnyProvider>, Error> {
    let provider = create_provider(resolved, env)?;
    Ok(LlmDriver::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dirs;
    use std::collections::HashMap;
    use std::time::Duration;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl EnvResolver for MapEnv {
        fn resolve_dirs(&self) -> Result<Dirs, Error> {
            Ok(Dirs::under_home("/tmp/unused"))
        }

        fn var(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|s| s.to_string())
        }
    }

    fn env(vars: &[(&'static str, &'static str)]) -> MapEnv {
        MapEnv(vars.iter().cloned().collect())
    }

    fn resolved(provider_type: ProviderType, api_key_env: Option<&str>) -> ResolvedProvider {
        ResolvedProvider {
            provider_type,
            model: None,
            api_key_env: api_key_env.map(|s| s.to_string()),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_provider_type_parse() {
        assert_eq!(ProviderType::parse("gemini"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::parse("GEMINI"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::parse("echo"), Some(ProviderType::Echo));
        assert_eq!(ProviderType::parse("gpt"), None);
    }

    #[test]
    fn test_provider_type_as_str() {
        assert_eq!(ProviderType::Gemini.as_str(), "gemini");
        assert_eq!(ProviderType::Echo.as_str(), "echo");
    }

    #[test]
    fn test_resolve_api_key_default_then_legacy() {
        assert_eq!(
            resolve_api_key(&env(&[("GEMINI_API_KEY", "a"), ("EXPO_PUBLIC_GEMINI_API_KEY", "b")]), None)
                .unwrap(),
            "a"
        );
        assert_eq!(
            resolve_api_key(&env(&[("EXPO_PUBLIC_GEMINI_API_KEY", "b")]), None).unwrap(),
            "b"
        );
    }

    #[test]
    fn test_resolve_api_key_explicit_env_only() {
        let e = env(&[("GEMINI_API_KEY", "a")]);
        let err = resolve_api_key(&e, Some("MY_KEY")).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_create_gemini_without_key_is_configuration_error() {
        let err = create_provider(&resolved(ProviderType::Gemini, None), &env(&[])).err().unwrap();
        assert_eq!(err, Error::configuration(MISSING_API_KEY_MESSAGE));
    }

    #[test]
    fn test_create_echo_needs_no_key() {
        let p = create_provider(&resolved(ProviderType::Echo, None), &env(&[])).unwrap();
        assert_eq!(p.name(), "echo");
    }

    #[test]
    fn test_create_gemini_with_key() {
        let p = create_provider(
            &resolved(ProviderType::Gemini, None),
            &env(&[("GEMINI_API_KEY", "k")]),
        )
        .unwrap();
        assert_eq!(p.name(), "gemini");
        assert_eq!(p.model(), "gemini-1.5-flash");
    }
}
