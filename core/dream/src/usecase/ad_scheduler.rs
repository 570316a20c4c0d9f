//! 解釈リクエストごとに交互に広告を出すポリシー
//!
//! フラグ `ad_show_next` は KeyValueStore に保存し、CLI の起動をまたいで交互になる。
//! 初期値は false（最初の解釈では出さない）。

use crate::ports::outbound::AdDisplay;
use common::error::Error;
use common::ports::outbound::{KeyValueStore, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 交互フラグを保存するキー
pub const AD_FLAG_KEY: &str = "ad_show_next";

pub struct AdScheduler {
    store: Arc<dyn KeyValueStore>,
    display: Arc<dyn AdDisplay>,
    log: Arc<dyn Log>,
}

impl AdScheduler {
    pub fn new(store: Arc<dyn KeyValueStore>, display: Arc<dyn AdDisplay>, log: Arc<dyn Log>) -> Self {
        Self { store, display, log }
    }

    /// フラグが立っていれば広告を出し、フラグを反転する。広告を出したら true。
    ///
    /// 失敗はログに残すだけで呼び出し側には返さない。
    pub fn tick(&self) -> bool {
        let mut show = false;
        let flipped = self.store.update(AD_FLAG_KEY, &mut |current| {
            show = current.as_deref().map(str::trim) == Some("true");
            Ok((!show).to_string())
        });
        if let Err(e) = flipped {
            self.warn("ad flag update failed", &e);
            return false;
        }
        if !show {
            return false;
        }
        match self.display.request_ad().and_then(|_| self.display.show_ad()) {
            Ok(()) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Debug, "ad shown")
                        .layer("usecase")
                        .kind("ads"),
                );
                true
            }
            Err(e) => {
                self.warn("ad display failed", &e);
                false
            }
        }
    }

    fn warn(&self, message: &str, e: &Error) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Warn, message)
                .layer("usecase")
                .kind("ads")
                .field("error", e.to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::{MemoryKeyValueStore, NoopLog};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingAds {
        shown: AtomicUsize,
        fail: bool,
    }

    impl AdDisplay for CountingAds {
        fn configure(&self, _unit_id: &str) -> Result<(), Error> {
            Ok(())
        }

        fn request_ad(&self) -> Result<(), Error> {
            if self.fail {
                return Err(Error::system("no fill"));
            }
            Ok(())
        }

        fn show_ad(&self) -> Result<(), Error> {
            self.shown.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_alternates_starting_without_ad() {
        let ads = Arc::new(CountingAds::default());
        let s = AdScheduler::new(Arc::new(MemoryKeyValueStore::new()), ads.clone(), Arc::new(NoopLog));
        let pattern: Vec<bool> = (0..4).map(|_| s.tick()).collect();
        assert_eq!(pattern, vec![false, true, false, true]);
        assert_eq!(ads.shown.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_flag_persists_across_instances() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let ads = Arc::new(CountingAds::default());
        assert!(!AdScheduler::new(kv.clone(), ads.clone(), Arc::new(NoopLog)).tick());
        assert!(AdScheduler::new(kv.clone(), ads.clone(), Arc::new(NoopLog)).tick());
        assert_eq!(kv.get(AD_FLAG_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_display_failure_is_swallowed_and_still_toggles() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(AD_FLAG_KEY, "true").unwrap();
        let ads = Arc::new(CountingAds {
            shown: AtomicUsize::new(0),
            fail: true,
        });
        let s = AdScheduler::new(kv.clone(), ads.clone(), Arc::new(NoopLog));
        assert!(!s.tick());
        assert_eq!(ads.shown.load(Ordering::SeqCst), 0);
        assert_eq!(kv.get(AD_FLAG_KEY).unwrap().as_deref(), Some("false"));
    }
}
