//! 実行時ディレクトリ（XDG / DREAM_HOME 解決結果）
//!
//! EnvResolver::resolve_dirs() で取得し、設定・ストア・ログのパス計算に使う。

use std::path::PathBuf;

/// 解決済みの config / data / state ディレクトリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Dirs {
    /// DREAM_HOME 配下にすべてを置く構成
    pub fn under_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            config_dir: home.join("config"),
            data_dir: home.join("data"),
            state_dir: home.join("state"),
        }
    }

    /// config.json のパス
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// キー・バリューストアのディレクトリ（data/store）
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    /// ログ格納ディレクトリ（state/logs）
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// JSONL ログファイル
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("dream.jsonl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_home_layout() {
        let d = Dirs::under_home("/tmp/dh");
        assert_eq!(d.config_file(), PathBuf::from("/tmp/dh/config/config.json"));
        assert_eq!(d.store_dir(), PathBuf::from("/tmp/dh/data/store"));
        assert_eq!(d.log_file(), PathBuf::from("/tmp/dh/state/logs/dream.jsonl"));
    }
}
