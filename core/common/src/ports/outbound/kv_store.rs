//! キー・バリューストア Outbound ポート
//!
//! 値は文字列（JSON）で、キー単位に丸ごと読み書きする。

use crate::error::Error;

/// 永続キー・バリューストア（Outbound ポート）
///
/// 実装は `common::adapter::FileKeyValueStore`（1 キー 1 ファイル）や
/// `common::adapter::MemoryKeyValueStore`（テスト用）など。
pub trait KeyValueStore: Send + Sync {
    /// キーの値を返す。存在しなければ Ok(None)
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// キーの値を丸ごと置き換える
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// 読み出し・変換・書き戻しを排他して行う。
    ///
    /// `f` は現在値（無ければ None）を受け取り、新しい値を返す。
    /// `f` が Err を返した場合は何も書かない。
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<String, Error>,
    ) -> Result<(), Error>;
}
