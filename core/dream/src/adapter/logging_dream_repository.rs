//! 日記の読み書きをログに記録する DreamRepository のラッパ

use crate::domain::DreamRecord;
use crate::ports::outbound::DreamRepository;
use common::domain::RecordId;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct LoggingDreamRepository {
    inner: Arc<dyn DreamRepository>,
    log: Arc<dyn Log>,
}

impl LoggingDreamRepository {
    pub fn new(inner: Arc<dyn DreamRepository>, log: Arc<dyn Log>) -> Self {
        Self { inner, log }
    }

    fn record(&self, message: &str, operation: &str, count: usize) -> LogRecord {
        LogRecord::new(LogLevel::Info, message)
            .layer("adapter")
            .kind("storage")
            .field("operation", operation)
            .field("count", count)
    }
}

impl DreamRepository for LoggingDreamRepository {
    fn load_all(&self) -> Vec<DreamRecord> {
        let out = self.inner.load_all();
        let _ = self.log.log(&self.record("dream read", "load_all", out.len()));
        out
    }

    fn try_load_all(&self) -> Result<Vec<DreamRecord>, Error> {
        let out = self.inner.try_load_all()?;
        let _ = self.log.log(&self.record("dream read", "load_all", out.len()));
        Ok(out)
    }

    fn append(&self, record: &DreamRecord) -> Result<DreamRecord, Error> {
        let stored = self.inner.append(record)?;
        let _ = self.log.log(
            &self
                .record("dream write", "append", 1)
                .field("dream_id", stored.id.to_string()),
        );
        Ok(stored)
    }

    fn remove(&self, date: &str) -> Result<Vec<DreamRecord>, Error> {
        let out = self.inner.remove(date)?;
        let _ = self.log.log(
            &self
                .record("dream write", "remove", out.len())
                .field("date", date),
        );
        Ok(out)
    }

    fn remove_by_id(&self, id: &RecordId) -> Result<Vec<DreamRecord>, Error> {
        let out = self.inner.remove_by_id(id)?;
        let _ = self.log.log(
            &self
                .record("dream write", "remove_by_id", out.len())
                .field("dream_id", id.to_string()),
        );
        Ok(out)
    }

    fn find(&self, key: &str) -> Result<Option<DreamRecord>, Error> {
        let out = self.inner.find(key)?;
        let count = usize::from(out.is_some());
        let _ = self.log.log(&self.record("dream read", "find", count).field("key", key));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::DreamStore;
    use common::adapter::MemoryKeyValueStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLog(Mutex<Vec<LogRecord>>);

    impl Log for RecordingLog {
        fn log(&self, record: &LogRecord) -> Result<(), Error> {
            self.0.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[test]
    fn test_logs_reads_and_writes() {
        let log = Arc::new(RecordingLog::default());
        let inner = Arc::new(DreamStore::new(
            Arc::new(MemoryKeyValueStore::new()),
            log.clone(),
        ));
        let repo = LoggingDreamRepository::new(inner, log.clone());
        repo.append(&DreamRecord::new(
            RecordId::new("00000001"),
            "2024-01-01T00:00:00.000Z",
            "A",
            "a",
        ))
        .unwrap();
        assert_eq!(repo.load_all().len(), 1);
        assert!(repo.remove_by_id(&RecordId::new("00000001")).unwrap().is_empty());

        let records = log.0.lock().unwrap();
        let ops: Vec<String> = records
            .iter()
            .filter_map(|r| r.fields.as_ref()?.get("operation")?.as_str().map(String::from))
            .collect();
        assert_eq!(ops, vec!["append", "load_all", "remove_by_id"]);
        assert!(records.iter().all(|r| r.kind.as_deref() == Some("storage")));
    }
}
