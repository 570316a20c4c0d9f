//! 広告表示の Outbound ポート

use common::error::Error;

/// 全画面広告の読み込み・表示
pub trait AdDisplay: Send + Sync {
    /// 広告ユニット ID を設定する
    fn configure(&self, unit_id: &str) -> Result<(), Error>;
    /// 広告を読み込む
    fn request_ad(&self) -> Result<(), Error>;
    /// 読み込み済みの広告を表示する
    fn show_ad(&self) -> Result<(), Error>;
}
