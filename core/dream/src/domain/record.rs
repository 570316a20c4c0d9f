//! 夢の記録（1 件 = 夢の本文と解釈）
//!
//! 永続化形式は `{ "id", "date", "dream", "interpretation" }` の JSON オブジェクト。
//! id の無い旧形式も読み込め、その場合は date で識別する。

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use common::domain::RecordId;
use common::error::Error;
use serde::{Deserialize, Serialize};

/// 夢の記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamRecord {
    #[serde(default)]
    pub id: RecordId,
    /// 作成時刻（RFC 3339、UTC、ミリ秒）
    pub date: String,
    pub dream: String,
    pub interpretation: String,
}

impl DreamRecord {
    pub fn new(
        id: RecordId,
        date: impl Into<String>,
        dream: impl Into<String>,
        interpretation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            dream: dream.into(),
            interpretation: interpretation.into(),
        }
    }

    /// 画面・CLI で使う識別キー（id があれば id、無ければ date）
    pub fn key(&self) -> &str {
        if self.id.is_empty() {
            self.date.as_str()
        } else {
            &*self.id
        }
    }

    /// id または date が key と一致するか
    pub fn matches(&self, key: &str) -> bool {
        (!self.id.is_empty() && &*self.id == key) || self.date == key
    }

    /// 一覧表示用の日付（例: January 2, 2024）
    pub fn display_date(&self) -> String {
        format_date(&self.date)
    }
}

/// エポックミリ秒を `2024-01-02T03:04:05.678Z` 形式にする
pub fn iso8601_from_ms(ms: u64) -> Result<String, Error> {
    let millis = i64::try_from(ms).map_err(|_| Error::system(format!("timestamp out of range: {}", ms)))?;
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| Error::system(format!("timestamp out of range: {}", ms)))
}

/// RFC 3339 の日時をローカルの日付で `Month D, YYYY` と表示する。解析できなければそのまま返す。
pub fn format_date(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(dt) => dt.with_timezone(&Local).format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso8601_from_ms() {
        assert_eq!(iso8601_from_ms(0).unwrap(), "1970-01-01T00:00:00.000Z");
        assert_eq!(
            iso8601_from_ms(1_704_164_645_678).unwrap(),
            "2024-01-02T03:04:05.678Z"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-02T12:04:05.678Z"), "January 2, 2024");
        assert_eq!(format_date("2023-12-25T12:00:00Z"), "December 25, 2023");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_date_uses_local_calendar_day() {
        let date = "2023-12-25T23:59:59Z";
        let local = Utc
            .with_ymd_and_hms(2023, 12, 25, 23, 59, 59)
            .unwrap()
            .with_timezone(&Local);
        assert_eq!(format_date(date), local.format("%B %-d, %Y").to_string());
        let offset = DateTime::parse_from_rfc3339("2024-01-01T23:30:00-05:00").unwrap();
        assert_eq!(
            format_date("2024-01-01T23:30:00-05:00"),
            offset.with_timezone(&Local).format("%B %-d, %Y").to_string()
        );
    }

    #[test]
    fn test_legacy_record_without_id() {
        let json = r#"{"date":"2024-01-01T00:00:00.000Z","dream":"a","interpretation":"b"}"#;
        let r: DreamRecord = serde_json::from_str(json).unwrap();
        assert!(r.id.is_empty());
        assert_eq!(r.key(), "2024-01-01T00:00:00.000Z");
        assert!(r.matches("2024-01-01T00:00:00.000Z"));
        assert!(!r.matches(""));
    }

    #[test]
    fn test_record_serializes_all_fields() {
        let r = DreamRecord::new(RecordId::new("0000abcd"), "2024-01-01T00:00:00.000Z", "a", "b");
        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(v["id"], "0000abcd");
        assert_eq!(v["date"], "2024-01-01T00:00:00.000Z");
        assert_eq!(v["dream"], "a");
        assert_eq!(v["interpretation"], "b");
        assert_eq!(r.key(), "0000abcd");
        assert!(r.matches("0000abcd"));
        assert!(r.matches("2024-01-01T00:00:00.000Z"));
    }
}
