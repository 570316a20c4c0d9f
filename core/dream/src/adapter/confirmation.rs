//! 対話による確認の実装（CLI 境界）
//!
//! stdin/stderr を用いた対話は adapter 層の責務。

use crate::domain::Approval;
use crate::ports::outbound::Confirmation;
use std::io::{self, BufRead, Write};

/// `y` / `yes` のみ許可とみなす
pub fn parse_answer(line: &str) -> Approval {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Approval::Approved,
        _ => Approval::Denied,
    }
}

/// CLI 対話による確認
pub struct CliConfirmation;

impl Confirmation for CliConfirmation {
    fn confirm(&self, title: &str, message: &str) -> Approval {
        eprintln!("============ {} =============", title);
        eprint!("{} [y/N]: ", message);
        let _ = io::stderr().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Approval::Denied,
            Ok(_) => parse_answer(&line),
        }
    }
}

/// --yes 指定時: 常に許可
pub struct AssumeYesConfirmation;

impl Confirmation for AssumeYesConfirmation {
    fn confirm(&self, _title: &str, _message: &str) -> Approval {
        Approval::Approved
    }
}

/// 非対話用: 常に拒否（stdin が端末でない時にプロンプトを出さない）
pub struct NonInteractiveConfirmation;

impl Confirmation for NonInteractiveConfirmation {
    fn confirm(&self, title: &str, _message: &str) -> Approval {
        eprintln!("{}: not confirmed (stdin is not a terminal; use --yes)", title);
        Approval::Denied
    }
}
