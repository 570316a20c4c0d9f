//! 文章生成サービスの Outbound ポート

use common::error::Error;

/// プロンプトから文章を生成する
///
/// 応答にテキストが無い場合は Ok(空文字列)。通信失敗は Error::RemoteService。
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, Error>;
}
