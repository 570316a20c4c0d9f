//! 共有先のアダプタ（標準出力 / 外部コマンドへ標準入力で渡す）

use crate::ports::outbound::ShareTarget;
use common::error::Error;
use common::ports::outbound::Process;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 標準出力へ書き出す共有先
pub struct StdoutShare {
    out: Mutex<Box<dyn Write + Send>>,
}

impl StdoutShare {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl Default for StdoutShare {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareTarget for StdoutShare {
    fn share(&self, title: Option<&str>, message: &str) -> Result<(), Error> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| Error::system("share output lock poisoned"))?;
        // 本文の先頭がタイトルと同じなら重ねて出さない
        let text = match title {
            Some(t) if !message.starts_with(t) => format!("{}\n\n{}\n", t, message),
            _ => format!("{}\n", message),
        };
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| Error::system(e.to_string()))
    }
}

/// 設定された外部コマンドの標準入力へメッセージを渡す共有先（例: wl-copy, pbcopy）
pub struct CommandShare {
    process: Arc<dyn Process>,
    program: PathBuf,
    args: Vec<String>,
}

impl CommandShare {
    /// `command` の先頭がプログラム、残りが引数。空なら None
    pub fn from_command(process: Arc<dyn Process>, command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            process,
            program: PathBuf::from(program),
            args: args.to_vec(),
        })
    }
}

impl ShareTarget for CommandShare {
    fn share(&self, _title: Option<&str>, message: &str) -> Result<(), Error> {
        let code = self.process.run_with_stdin(&self.program, &self.args, message)?;
        if code != 0 {
            return Err(Error::system(format!(
                "{} exited with status {}",
                self.program.display(),
                code
            )));
        }
        Ok(())
    }
}
