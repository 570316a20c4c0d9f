//! 日記の一覧・表示・削除・共有と、対話ブラウザの画面状態

use crate::domain::{DreamRecord, ShareMessage};
use crate::ports::outbound::{Confirmation, DreamRepository, ShareTarget};
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub const DELETE_TITLE: &str = "Delete Dream";
pub const DELETE_MESSAGE: &str = "Are you sure you want to delete this dream?";

/// 一覧の結果。保存データが読めなかった場合は warning に理由が入る
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryListing {
    pub records: Vec<DreamRecord>,
    pub warning: Option<String>,
}

/// 削除の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 削除後のリスト
    Deleted(Vec<DreamRecord>),
    /// 確認で拒否された
    Cancelled,
    NotFound,
}

pub struct DiaryUseCase {
    repo: Arc<dyn DreamRepository>,
    confirmation: Arc<dyn Confirmation>,
    share: Arc<dyn ShareTarget>,
    log: Arc<dyn Log>,
}

impl DiaryUseCase {
    pub fn new(
        repo: Arc<dyn DreamRepository>,
        confirmation: Arc<dyn Confirmation>,
        share: Arc<dyn ShareTarget>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            repo,
            confirmation,
            share,
            log,
        }
    }

    /// 全件（新しい順）
    pub fn list(&self) -> DiaryListing {
        match self.repo.try_load_all() {
            Ok(records) => DiaryListing {
                records,
                warning: None,
            },
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "diary could not be read")
                        .layer("usecase")
                        .kind("storage")
                        .field("error", e.to_string()),
                );
                DiaryListing {
                    records: Vec::new(),
                    warning: Some(format!("saved dreams could not be read: {}", e)),
                }
            }
        }
    }

    /// id または date で 1 件取得
    pub fn show(&self, key: &str) -> Result<DreamRecord, Error> {
        self.repo.find(key)?.ok_or_else(|| not_found(key))
    }

    /// 確認のうえ削除する。id があれば id、無ければ date で消す
    pub fn delete(&self, key: &str) -> Result<DeleteOutcome, Error> {
        let record = match self.repo.find(key)? {
            Some(r) => r,
            None => return Ok(DeleteOutcome::NotFound),
        };
        if !self
            .confirmation
            .confirm(DELETE_TITLE, DELETE_MESSAGE)
            .is_approved()
        {
            return Ok(DeleteOutcome::Cancelled);
        }
        let remaining = if record.id.is_empty() {
            self.repo.remove(&record.date)?
        } else {
            self.repo.remove_by_id(&record.id)?
        };
        Ok(DeleteOutcome::Deleted(remaining))
    }

    /// 共有先へ渡す。共有の失敗はログに残して Ok(false)
    pub fn share(&self, key: &str) -> Result<bool, Error> {
        let record = self.show(key)?;
        Ok(self.share_record(&record))
    }

    fn share_record(&self, record: &DreamRecord) -> bool {
        let msg = ShareMessage::for_record(record);
        match self.share.share(msg.title.as_deref(), &msg.message) {
            Ok(()) => true,
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "share failed")
                        .layer("usecase")
                        .kind("share")
                        .field("dream_id", record.id.to_string())
                        .field("error", e.to_string()),
                );
                false
            }
        }
    }
}

fn not_found(key: &str) -> Error {
    Error::invalid_argument(format!("No dream found for '{}'", key))
}

/// 対話ブラウザの状態（表示中リストと展開中の 1 件）
pub struct DiaryBrowser<'a> {
    diary: &'a DiaryUseCase,
    records: Vec<DreamRecord>,
    expanded: Option<String>,
    warning: Option<String>,
}

impl<'a> DiaryBrowser<'a> {
    pub fn open(diary: &'a DiaryUseCase) -> Self {
        let listing = diary.list();
        Self {
            diary,
            records: listing.records,
            expanded: None,
            warning: listing.warning,
        }
    }

    pub fn records(&self) -> &[DreamRecord] {
        &self.records
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn is_expanded(&self, record: &DreamRecord) -> bool {
        self.expanded.as_deref() == Some(record.key())
    }

    /// 展開中の記録を選ぶと閉じ、別の記録を選ぶと切り替わる
    pub fn toggle_expand(&mut self, key: &str) {
        if self.expanded.as_deref() == Some(key) {
            self.expanded = None;
        } else {
            self.expanded = Some(key.to_string());
        }
    }

    /// 確認のうえ削除し、表示中リストを削除後のリストに置き換える
    pub fn delete(&mut self, key: &str) -> Result<DeleteOutcome, Error> {
        let outcome = self.diary.delete(key)?;
        if let DeleteOutcome::Deleted(remaining) = &outcome {
            self.records = remaining.clone();
            let still_there = self
                .expanded
                .as_deref()
                .map(|k| self.records.iter().any(|r| r.key() == k))
                .unwrap_or(false);
            if !still_there {
                self.expanded = None;
            }
        }
        Ok(outcome)
    }

    pub fn share(&self, key: &str) -> Result<bool, Error> {
        match self.records.iter().find(|r| r.matches(key)) {
            Some(r) => Ok(self.diary.share_record(r)),
            None => Err(not_found(key)),
        }
    }
}
