//! Log 実装（ファイルへ JSONL 追記 / stderr 表示 / 複数出力 / 何もしない）
//!
//! ログの主な出力先はファイル。-v 指定時のみ stderr にも要点を出す。

use crate::error::Error;
use crate::ports::outbound::{FileSystem, Log, LogRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 400;

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let mut w = self.fs.open_append(&self.path)?;
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        w.write_all(line.as_bytes())
            .and_then(|_| w.flush())
            .map_err(|e| Error::storage(e.to_string()))?;
        Ok(())
    }
}

/// 人間向けに stderr へ 1 行で出す Log 実装（fields は要点のみ）
#[derive(Debug, Clone, Default)]
pub struct StderrLog;

impl StderrLog {
    fn format(record: &LogRecord) -> String {
        let mut line = format!("[{}] {}", record.level.as_str(), record.message);
        if let Some(kind) = &record.kind {
            line.push_str(&format!(" ({})", kind));
        }
        if let Some(fields) = &record.fields {
            let s = serde_json::to_string(fields).unwrap_or_default();
            if s.len() > FIELDS_SUMMARY_MAX {
                let truncated: String = s.chars().take(FIELDS_SUMMARY_MAX).collect();
                line.push_str(&format!(" {}... (len={})", truncated, s.len()));
            } else {
                line.push(' ');
                line.push_str(&s);
            }
        }
        line
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        eprintln!("{}", Self::format(record));
        Ok(())
    }
}

/// 複数の Log へ同じレコードを流す。1 つが失敗しても残りには書く
pub struct FanoutLog {
    sinks: Vec<Arc<dyn Log>>,
}

impl FanoutLog {
    pub fn new(sinks: Vec<Arc<dyn Log>>) -> Self {
        Self { sinks }
    }
}

impl Log for FanoutLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// 何も出力しない Log 実装（テスト用・ログ先が解決できない時のフォールバック）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}
