//! エラーハンドリング
//!
//! 境界ごとに種別を分け、CLI の終了コード（sysexits 準拠）に対応付ける。

use thiserror::Error as ThisError;

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// JSON のパース・シリアライズ失敗
    #[error("{0}")]
    Json(String),
    /// 生成テキストサービスへの通信・リモート側の失敗
    #[error("{0}")]
    RemoteService(String),
    /// 想定外のシステムエラー
    #[error("{0}")]
    System(String),
    /// 永続化（キー・バリューストア / ファイル）の読み書き失敗
    #[error("{0}")]
    Storage(String),
    /// 必須の設定（API キー等）が無い
    #[error("{0}")]
    Configuration(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteService(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// usage を併せて表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) => 65,
            Self::RemoteService(_) => 69,
            Self::System(_) => 70,
            Self::Storage(_) => 74,
            Self::Configuration(_) => 78,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::system("test");
        assert_eq!(err.exit_code(), 70);
        assert!(!err.is_usage());
    }

    #[test]
    fn test_exit_codes_per_kind() {
        assert_eq!(Error::json("x").exit_code(), 65);
        assert_eq!(Error::remote("x").exit_code(), 69);
        assert_eq!(Error::storage("x").exit_code(), 74);
        assert_eq!(Error::configuration("x").exit_code(), 78);
    }

    #[test]
    fn test_from_serde_json_error() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = e.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
