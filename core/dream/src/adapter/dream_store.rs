//! KeyValueStore 上に夢の記録リストを置く DreamRepository 実装
//!
//! キー `dreams` に JSON 配列（新しい順）を丸ごと保存する。
//! 読み・変更・書き戻しは KeyValueStore::update で排他する。

use crate::domain::DreamRecord;
use crate::ports::outbound::DreamRepository;
use common::domain::RecordId;
use common::error::Error;
use common::ports::outbound::{KeyValueStore, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 記録リストを保存するキー
pub const DREAMS_KEY: &str = "dreams";

pub struct DreamStore {
    store: Arc<dyn KeyValueStore>,
    log: Arc<dyn Log>,
}

impl DreamStore {
    pub fn new(store: Arc<dyn KeyValueStore>, log: Arc<dyn Log>) -> Self {
        Self { store, log }
    }

    fn decode(raw: Option<&str>) -> Result<Vec<DreamRecord>, Error> {
        match raw {
            None => Ok(Vec::new()),
            Some(s) if s.trim().is_empty() => Ok(Vec::new()),
            Some(s) => serde_json::from_str(s)
                .map_err(|e| Error::json(format!("{} is corrupt: {}", DREAMS_KEY, e))),
        }
    }

    fn encode(records: &[DreamRecord]) -> Result<String, Error> {
        Ok(serde_json::to_string(records)?)
    }

    fn log_failure(&self, operation: &str, e: &Error) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Error, format!("dream store {} failed", operation))
                .layer("adapter")
                .kind("storage")
                .field("operation", operation)
                .field("error", e.to_string()),
        );
    }

    /// 既存の ID と重なる場合は保存済みの最大 ID の次を割り当てる
    ///
    /// ID 生成はプロセスごとなので、同じ ms に別プロセスが追記すると重なりうる。
    /// ロック内で決めるため、保存される ID は常に一意。
    fn unique_id(records: &[DreamRecord], id: &RecordId) -> Result<RecordId, Error> {
        if id.is_empty() || !records.iter().any(|r| &r.id == id) {
            return Ok(id.clone());
        }
        let max = records
            .iter()
            .map(|r| &r.id)
            .filter(|r| r.len() == id.len())
            .max()
            .unwrap_or(id);
        max.successor()
            .ok_or_else(|| Error::storage(format!("No record id left after '{}'", max)))
    }

    /// 条件に合う記録を除いて書き戻し、結果のリストを返す
    fn retain(
        &self,
        operation: &str,
        keep: impl Fn(&DreamRecord) -> bool,
    ) -> Result<Vec<DreamRecord>, Error> {
        let mut remaining = Vec::new();
        let result = self.store.update(DREAMS_KEY, &mut |current| {
            let mut records = Self::decode(current.as_deref())?;
            records.retain(|r| keep(r));
            let encoded = Self::encode(&records)?;
            remaining = records;
            Ok(encoded)
        });
        match result {
            Ok(()) => Ok(remaining),
            Err(e) => {
                self.log_failure(operation, &e);
                Err(Error::storage(e.to_string()))
            }
        }
    }
}

impl DreamRepository for DreamStore {
    fn load_all(&self) -> Vec<DreamRecord> {
        match self.try_load_all() {
            Ok(records) => records,
            Err(e) => {
                self.log_failure("load", &e);
                Vec::new()
            }
        }
    }

    fn try_load_all(&self) -> Result<Vec<DreamRecord>, Error> {
        let raw = self.store.get(DREAMS_KEY)?;
        Self::decode(raw.as_deref())
    }

    fn append(&self, record: &DreamRecord) -> Result<DreamRecord, Error> {
        let mut stored = record.clone();
        let result = self.store.update(DREAMS_KEY, &mut |current| {
            let mut records = Self::decode(current.as_deref())?;
            let mut entry = record.clone();
            entry.id = Self::unique_id(&records, &record.id)?;
            records.insert(0, entry.clone());
            let encoded = Self::encode(&records)?;
            stored = entry;
            Ok(encoded)
        });
        match result {
            Ok(()) => Ok(stored),
            Err(e) => {
                self.log_failure("append", &e);
                Err(Error::storage(e.to_string()))
            }
        }
    }

    fn remove(&self, date: &str) -> Result<Vec<DreamRecord>, Error> {
        self.retain("remove", |r| r.date != date)
    }

    fn remove_by_id(&self, id: &RecordId) -> Result<Vec<DreamRecord>, Error> {
        self.retain("remove_by_id", |r| r.id.is_empty() || &r.id != id)
    }

    fn find(&self, key: &str) -> Result<Option<DreamRecord>, Error> {
        let records = self.try_load_all()?;
        let by_id = records
            .iter()
            .find(|r| !r.id.is_empty() && &*r.id == key)
            .cloned();
        Ok(by_id.or_else(|| records.into_iter().find(|r| r.date == key)))
    }
}
