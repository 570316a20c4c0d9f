//! config.json と CLI 指定からプロバイダ設定を解決する

use crate::config::AppConfig;
use crate::domain::{ModelName, ProviderName};
use crate::error::Error;
use crate::llm::factory::ProviderType;
use std::time::Duration;

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProvider {
    pub provider_type: ProviderType,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub timeout: Duration,
}

/// 要求されたプロバイダ名・モデル名（None の場合は config.json、さらに無ければ gemini）から解決する。
/// 不明なプロバイダの場合は Error::invalid_argument（is_usage == true）で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    requested_model: Option<&ModelName>,
    cfg: &AppConfig,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested
        .map(|r| &**r)
        .or(cfg.provider.as_deref())
        .unwrap_or("gemini");

    let provider_type = ProviderType::parse(effective_name).ok_or_else(|| {
        Error::invalid_argument(format!(
            "Unknown provider: '{}'. Available: {}",
            effective_name,
            ProviderType::all_names().join(", ")
        ))
    })?;

    let model = requested_model
        .map(|m| m.to_string())
        .or_else(|| cfg.model.clone());

    Ok(ResolvedProvider {
        provider_type,
        model,
        api_key_env: cfg.api_key_env.clone(),
        timeout: Duration::from_secs(cfg.timeout_secs.max(1)),
    })
}
