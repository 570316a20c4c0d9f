//! 共有メッセージの組み立て

use crate::domain::record::{format_date, DreamRecord};

/// 共有先に渡すタイトルと本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub title: Option<String>,
    pub message: String,
}

impl ShareMessage {
    /// 解釈直後の共有（タイトル無し）
    pub fn for_interpretation(dream: &str, interpretation: &str) -> Self {
        Self {
            title: None,
            message: format!("Dream:\n{}\n\nInterpretation:\n{}", dream, interpretation),
        }
    }

    /// 日記からの共有。タイトルと本文の先頭に日付を入れる
    pub fn for_record(record: &DreamRecord) -> Self {
        let title = format!("Dream from {}", format_date(&record.date));
        let message = format!(
            "{}\n\nDream:\n{}\n\nInterpretation:\n{}",
            title, record.dream, record.interpretation
        );
        Self {
            title: Some(title),
            message,
        }
    }
}
