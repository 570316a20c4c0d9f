//! 環境変数解決 Outbound ポート
//!
//! 設定・データ・ログのディレクトリと API キーを環境変数から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::Dirs;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// config / data / state ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. DREAM_HOME（設定されていれば、その配下に config/ data/ state/）
    /// 2. $XDG_CONFIG_HOME/dream, $XDG_DATA_HOME/dream, $XDG_STATE_HOME/dream
    /// 3. $HOME/.config/dream, $HOME/.local/share/dream, $HOME/.local/state/dream
    fn resolve_dirs(&self) -> Result<Dirs, Error>;

    /// 任意の環境変数（空文字は未設定扱い）
    fn var(&self, name: &str) -> Option<String>;
}
