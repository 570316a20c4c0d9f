//! 共有先の Outbound ポート

use common::error::Error;

/// タイトル（任意）とメッセージを外部へ渡す
pub trait ShareTarget: Send + Sync {
    fn share(&self, title: Option<&str>, message: &str) -> Result<(), Error>;
}
