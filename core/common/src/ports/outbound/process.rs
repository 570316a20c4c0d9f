//! サブプロセス実行 Outbound ポート
//!
//! 共有コマンド（クリップボード等）への受け渡しを trait で抽象化する。

use crate::error::Error;
use std::path::Path;

/// サブプロセス実行の抽象
///
/// 実装は `common::adapter::StdProcess`（std::process::Command）など。
pub trait Process: Send + Sync {
    /// プログラムを引数付きで実行し、`stdin` を標準入力に流し込んで終了コードを返す
    fn run_with_stdin(&self, program: &Path, args: &[String], stdin: &str) -> Result<i32, Error>;
}
