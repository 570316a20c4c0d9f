//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::Dirs;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "dream";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        resolve_dirs_with(|name| self.var(name))
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }
}

/// 環境変数の参照関数からディレクトリを解決する（テストから直接呼べるよう分離）
pub(crate) fn resolve_dirs_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Dirs, Error> {
    if let Some(home) = lookup("DREAM_HOME") {
        return Ok(Dirs::under_home(home));
    }

    let home = lookup("HOME").map(PathBuf::from);
    let xdg = |var: &str, fallback: &[&str]| -> Result<PathBuf, Error> {
        if let Some(base) = lookup(var) {
            return Ok(PathBuf::from(base).join(APP_DIR));
        }
        let mut path = home
            .clone()
            .ok_or_else(|| Error::configuration("HOME is not set (set DREAM_HOME or HOME)"))?;
        for part in fallback {
            path.push(part);
        }
        path.push(APP_DIR);
        Ok(path)
    };

    Ok(Dirs {
        config_dir: xdg("XDG_CONFIG_HOME", &[".config"])?,
        data_dir: xdg("XDG_DATA_HOME", &[".local", "share"])?,
        state_dir: xdg("XDG_STATE_HOME", &[".local", "state"])?,
    })
}
