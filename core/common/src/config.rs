//! config.json 用の設定型
//!
//! 生成テキストプロバイダ（type / model / API キーの環境変数 / タイムアウト）、
//! 広告表示、共有コマンドの設定をまとめて持つ。ファイルが無ければ既定値。

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use serde::Deserialize;
use std::path::Path;

/// 既定のリクエストタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// config.json のルート
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 使うプロバイダ名（gemini | echo）。未指定時は gemini
    pub provider: Option<String>,
    /// モデル名（省略時はプロバイダのデフォルト）
    pub model: Option<String>,
    /// API キーを読む環境変数名（省略時はプロバイダのデフォルト）
    pub api_key_env: Option<String>,
    /// HTTP リクエストのタイムアウト秒
    pub timeout_secs: u64,
    pub ads: AdsConfig,
    /// 共有時にメッセージを標準入力で渡すコマンド（例: ["wl-copy"]）。空なら stdout に出す
    pub share_command: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: None,
            model: None,
            api_key_env: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ads: AdsConfig::default(),
            share_command: Vec::new(),
        }
    }
}

/// 広告表示の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdsConfig {
    pub enabled: bool,
    /// 広告ユニット ID（省略時はビルド種別で決まる既定値）
    pub unit_id: Option<String>,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            unit_id: None,
        }
    }
}

/// serde 用の内部構造（未指定フィールドを既定値で埋めるため Option で受ける）
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AppConfigRaw {
    #[serde(alias = "default_provider")]
    provider: Option<String>,
    #[serde(alias = "default_model")]
    model: Option<String>,
    api_key_env: Option<String>,
    timeout_secs: Option<u64>,
    ads: Option<AdsConfigRaw>,
    share_command: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AdsConfigRaw {
    enabled: Option<bool>,
    unit_id: Option<String>,
}

impl AppConfig {
    /// JSON 文字列からパース（ファイル読みは load で行う）
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: AppConfigRaw = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// config.json を読み込む。ファイルが無ければ既定値、JSON が壊れていれば Err（メッセージにパス含める）
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, Error> {
        if !fs.exists(path) {
            return Ok(Self::default());
        }
        let contents = fs.read_to_string(path)?;
        Self::parse(&contents).map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
    }
}

impl From<AppConfigRaw> for AppConfig {
    fn from(r: AppConfigRaw) -> Self {
        let defaults = AdsConfig::default();
        let ads = r
            .ads
            .map(|a| AdsConfig {
                enabled: a.enabled.unwrap_or(defaults.enabled),
                unit_id: a.unit_id.filter(|s| !s.is_empty()),
            })
            .unwrap_or(defaults);
        AppConfig {
            provider: r.provider.filter(|s| !s.is_empty()),
            model: r.model.filter(|s| !s.is_empty()),
            api_key_env: r.api_key_env.filter(|s| !s.is_empty()),
            timeout_secs: r.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ads,
            share_command: r.share_command.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;

    #[test]
    fn test_parse_empty_object() {
        let cfg = AppConfig::parse("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert!(cfg.ads.enabled);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_full() {
        let json = r#"
        {
            "provider": "echo",
            "model": "gemini-1.5-pro",
            "api_key_env": "MY_KEY",
            "timeout_secs": 5,
            "ads": { "enabled": false, "unit_id": "unit-1" },
            "share_command": ["wl-copy", "--trim-newline"]
        }
        "#;
        let cfg = AppConfig::parse(json).unwrap();
        assert_eq!(cfg.provider.as_deref(), Some("echo"));
        assert_eq!(cfg.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(cfg.api_key_env.as_deref(), Some("MY_KEY"));
        assert_eq!(cfg.timeout_secs, 5);
        assert!(!cfg.ads.enabled);
        assert_eq!(cfg.ads.unit_id.as_deref(), Some("unit-1"));
        assert_eq!(cfg.share_command, vec!["wl-copy", "--trim-newline"]);
    }

    #[test]
    fn test_parse_aliases_and_empty_strings() {
        let json = r#"{ "default_provider": "gemini", "default_model": "", "ads": {} }"#;
        let cfg = AppConfig::parse(json).unwrap();
        assert_eq!(cfg.provider.as_deref(), Some("gemini"));
        assert!(cfg.model.is_none());
        assert!(cfg.ads.enabled);
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        assert!(AppConfig::parse(r#"{ "providr": "echo" }"#).is_err());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load(&StdFileSystem, &dir.path().join("config.json")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_load_broken_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::load(&StdFileSystem, &path).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("config.json"));
    }
}
