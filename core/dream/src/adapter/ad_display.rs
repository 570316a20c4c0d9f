//! 広告表示のアダプタ（stderr に 1 行のスポンサー表示 / 何もしない）

use crate::ports::outbound::AdDisplay;
use common::error::Error;
use std::io::Write;
use std::sync::Mutex;

/// 開発ビルドで使うテスト用広告ユニット
pub const TEST_AD_UNIT_ID: &str = "ca-app-pub-3940256099942544/1033173712";
/// リリースビルドの広告ユニット
pub const PRODUCTION_AD_UNIT_ID: &str = "ca-app-pub-2710323073729207/6519514182";

/// ビルド種別に応じた既定の広告ユニット
pub fn default_ad_unit_id() -> &'static str {
    if cfg!(debug_assertions) {
        TEST_AD_UNIT_ID
    } else {
        PRODUCTION_AD_UNIT_ID
    }
}

#[derive(Debug, Default)]
struct AdState {
    unit_id: Option<String>,
    loaded: bool,
}

/// スポンサー表示を書き出すアダプタ（既定は stderr）
pub struct ConsoleAdDisplay {
    state: Mutex<AdState>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleAdDisplay {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(AdState::default()),
            out: Mutex::new(out),
        }
    }

    fn state(&self) -> Result<std::sync::MutexGuard<'_, AdState>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::system("ad state lock poisoned"))
    }
}

impl Default for ConsoleAdDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl AdDisplay for ConsoleAdDisplay {
    fn configure(&self, unit_id: &str) -> Result<(), Error> {
        let mut state = self.state()?;
        state.unit_id = Some(unit_id.to_string());
        state.loaded = false;
        Ok(())
    }

    fn request_ad(&self) -> Result<(), Error> {
        let mut state = self.state()?;
        if state.unit_id.is_none() {
            return Err(Error::system("ad unit is not configured"));
        }
        state.loaded = true;
        Ok(())
    }

    fn show_ad(&self) -> Result<(), Error> {
        let mut state = self.state()?;
        let unit_id = match (&state.unit_id, state.loaded) {
            (Some(id), true) => id.clone(),
            _ => return Err(Error::system("no ad loaded")),
        };
        state.loaded = false;
        let mut out = self
            .out
            .lock()
            .map_err(|_| Error::system("ad output lock poisoned"))?;
        writeln!(out, "[sponsored] Dream interpretations are supported by ads ({})", unit_id)
            .and_then(|_| out.flush())
            .map_err(|e| Error::system(e.to_string()))
    }
}

/// 広告無効時のアダプタ
#[derive(Debug, Clone, Default)]
pub struct NoopAdDisplay;

impl AdDisplay for NoopAdDisplay {
    fn configure(&self, _unit_id: &str) -> Result<(), Error> {
        Ok(())
    }

    fn request_ad(&self) -> Result<(), Error> {
        Ok(())
    }

    fn show_ad(&self) -> Result<(), Error> {
        Ok(())
    }
}
