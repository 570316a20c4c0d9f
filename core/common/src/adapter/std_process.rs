//! 標準サブプロセス実行（std::process::Command を委譲）

use crate::error::Error;
use crate::ports::outbound::Process;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// 標準ライブラリの Command を使う Process 実装
#[derive(Debug, Clone, Default)]
pub struct StdProcess;

impl Process for StdProcess {
    fn run_with_stdin(&self, program: &Path, args: &[String], stdin: &str) -> Result<i32, Error> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::system(format!("Failed to execute '{}': {}", program.display(), e))
            })?;
        if let Some(mut input) = child.stdin.take() {
            input.write_all(stdin.as_bytes()).map_err(|e| {
                Error::system(format!(
                    "Failed to write stdin of '{}': {}",
                    program.display(),
                    e
                ))
            })?;
        }
        let status = child.wait().map_err(|e| {
            Error::system(format!("Failed to wait for '{}': {}", program.display(), e))
        })?;
        Ok(status.code().unwrap_or(1))
    }
}
