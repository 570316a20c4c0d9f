//! ファイルに 1 キー 1 ファイルで保存する KeyValueStore 実装
//!
//! 書き込みは一時ファイル + rename で置き換える。update はプロセス内 Mutex と
//! アドバイザリロックファイル（<key>.lock）で直列化し、読み書きの割り込みを防ぐ。

use crate::error::Error;
use crate::ports::outbound::{Clock, FileSystem, KeyValueStore};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// この時間より古いロックファイルは持ち主が死んだものとみなす
const STALE_LOCK_MS: u64 = 30_000;
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(10);
const LOCK_MAX_ATTEMPTS: u32 = 500;

/// ロックファイルの中身を取得ごとに一意にするためのカウンタ
static LOCK_SEQ: AtomicU64 = AtomicU64::new(0);

/// ファイルベースの KeyValueStore
pub struct FileKeyValueStore {
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
    dir: PathBuf,
    guard: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(fs: Arc<dyn FileSystem>, clock: Arc<dyn Clock>, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            clock,
            dir: dir.into(),
            guard: Mutex::new(()),
        }
    }

    fn value_path(&self, key: &str) -> Result<PathBuf, Error> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn read(&self, path: &Path) -> Result<Option<String>, Error> {
        if !self.fs.exists(path) {
            return Ok(None);
        }
        self.fs.read_to_string(path).map(Some)
    }

    fn write_atomic(&self, path: &Path, value: &str) -> Result<(), Error> {
        self.fs.create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        self.fs.write(&tmp, value)?;
        self.fs.rename(&tmp, path)
    }

    fn acquire(&self, key: &str) -> Result<LockFile<'_>, Error> {
        self.fs.create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.lock", key));
        for _ in 0..LOCK_MAX_ATTEMPTS {
            let now = self.clock.now_ms();
            let token = format!(
                "{}-{}-{}",
                now,
                std::process::id(),
                LOCK_SEQ.fetch_add(1, Ordering::Relaxed)
            );
            if self.fs.create_new(&path, &token)? {
                return Ok(LockFile {
                    fs: self.fs.as_ref(),
                    path,
                    token,
                });
            }
            if let Some(owner) = self.stale_owner(&path, now) {
                // 判定後に別の待ち手が取り直していれば中身が変わっているので消さない。
                // 再確認から削除までの間に取り直された場合の競合は残る。
                if self.read(&path)?.as_deref() == Some(owner.as_str()) {
                    let _ = self.fs.remove_file(&path);
                }
                continue;
            }
            std::thread::sleep(LOCK_RETRY_INTERVAL);
        }
        Err(Error::storage(format!(
            "Timed out waiting for lock '{}'",
            path.display()
        )))
    }

    /// ロックが古ければ、その時点の中身（持ち主のトークン）を返す
    fn stale_owner(&self, lock_path: &Path, now_ms: u64) -> Option<String> {
        let meta = self.fs.metadata(lock_path).ok()?;
        if !meta.is_file() {
            return None;
        }
        let owner = self.fs.read_to_string(lock_path).ok()?;
        (now_ms.saturating_sub(meta.modified_ms()?) > STALE_LOCK_MS).then_some(owner)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.value_path(key)?;
        self.read(&path)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.value_path(key)?;
        self.write_atomic(&path, value)
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<String, Error>,
    ) -> Result<(), Error> {
        let path = self.value_path(key)?;
        let _in_process = self
            .guard
            .lock()
            .map_err(|_| Error::storage("store lock poisoned"))?;
        let _lock = self.acquire(key)?;
        let current = self.read(&path)?;
        let next = f(current)?;
        self.write_atomic(&path, &next)
    }
}

/// drop 時にロックファイルを消す。中身が自分のトークンでなければ他者のロックなので残す
struct LockFile<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
    token: String,
}

impl Drop for LockFile<'_> {
    fn drop(&mut self) {
        match self.fs.read_to_string(&self.path) {
            Ok(current) if current == self.token => {
                let _ = self.fs.remove_file(&self.path);
            }
            _ => {}
        }
    }
}

/// キーはファイル名になるため英数字・`_`・`-` のみ許可する
fn validate_key(key: &str) -> Result<(), Error> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!("invalid store key: '{}'", key)))
    }
}
