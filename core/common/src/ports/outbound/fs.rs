//! ファイルシステム Outbound ポート
//!
//! usecase / adapter はこの trait 経由でのみファイル I/O を行う。

use crate::error::Error;
use std::path::Path;

/// ファイルメタデータ（種別・更新時刻）
#[derive(Debug, Clone)]
pub struct FileMetadata {
    is_file: bool,
    modified_ms: Option<u64>,
}

impl FileMetadata {
    pub fn new(is_file: bool, modified_ms: Option<u64>) -> Self {
        Self {
            is_file,
            modified_ms,
        }
    }

    pub fn is_file(&self) -> bool {
        self.is_file
    }

    /// 最終更新時刻（Unix epoch ms）。取得できない FS では None
    pub fn modified_ms(&self) -> Option<u64> {
        self.modified_ms
    }
}

/// ファイルシステム抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdFileSystem` など。
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    fn write(&self, path: &Path, contents: &str) -> Result<(), Error>;
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    fn metadata(&self, path: &Path) -> Result<FileMetadata, Error>;
    fn remove_file(&self, path: &Path) -> Result<(), Error>;
    /// 追記用に開く（存在しなければ作成）。返した Writer を drop すると閉じる。
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;
    /// 排他的に新規作成する。既に存在すれば Ok(false)
    fn create_new(&self, path: &Path, contents: &str) -> Result<bool, Error>;

    /// パスが存在するか（metadata が取れれば true）
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }
}
