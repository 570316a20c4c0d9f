//! 夢の記録の永続化 Outbound ポート

use crate::domain::DreamRecord;
use common::domain::RecordId;
use common::error::Error;

/// 夢の記録リスト（新しい順）を保持する Outbound ポート
///
/// 実装は adapter::DreamStore（KeyValueStore 上の JSON 配列）。
pub trait DreamRepository: Send + Sync {
    /// 全件を返す。読めない・壊れている場合はログに残して空リスト
    fn load_all(&self) -> Vec<DreamRecord>;

    /// 全件を返す。「空」と「読めない/壊れている」を区別する
    fn try_load_all(&self) -> Result<Vec<DreamRecord>, Error>;

    /// 先頭に追加し、保存した記録を返す
    ///
    /// id が既存の記録と重なる場合は、書き込みと同じ排他の中で一意な id に振り直す。
    fn append(&self, record: &DreamRecord) -> Result<DreamRecord, Error>;

    /// date が一致する記録をすべて除き、残りを返す（一致しなくても書き戻す）
    fn remove(&self, date: &str) -> Result<Vec<DreamRecord>, Error>;

    /// id が一致する記録を除き、残りを返す
    fn remove_by_id(&self, id: &RecordId) -> Result<Vec<DreamRecord>, Error>;

    /// id（無ければ date 完全一致）で 1 件探す
    fn find(&self, key: &str) -> Result<Option<DreamRecord>, Error>;
}
