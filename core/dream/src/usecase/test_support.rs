//! usecase テスト用のフェイク（生成サービス・共有先・確認）

use crate::domain::Approval;
use crate::ports::outbound::{Confirmation, ShareTarget, TextGenerator};
use common::error::Error;
use std::sync::Mutex;

/// 決まった応答を返し、受け取ったプロンプトを記録する
pub struct ScriptedGenerator {
    reply: Result<String, Error>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(reply: Result<&str, Error>) -> Self {
        Self {
            reply: reply.map(String::from),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

/// 共有されたタイトルと本文を記録する
#[derive(Default)]
pub struct RecordingShare {
    messages: Mutex<Vec<(Option<String>, String)>>,
    pub fail: bool,
}

impl RecordingShare {
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<(Option<String>, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl ShareTarget for RecordingShare {
    fn share(&self, title: Option<&str>, message: &str) -> Result<(), Error> {
        if self.fail {
            return Err(Error::system("share sheet unavailable"));
        }
        self.messages
            .lock()
            .unwrap()
            .push((title.map(String::from), message.to_string()));
        Ok(())
    }
}

/// 決まった結果を返し、呼ばれた回数を数える確認
pub struct StubConfirmation {
    result: Approval,
    asked: Mutex<Vec<(String, String)>>,
}

impl StubConfirmation {
    pub fn approved() -> Self {
        Self::new(Approval::Approved)
    }

    pub fn denied() -> Self {
        Self::new(Approval::Denied)
    }

    fn new(result: Approval) -> Self {
        Self {
            result,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirmation for StubConfirmation {
    fn confirm(&self, title: &str, message: &str) -> Approval {
        self.asked
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
        self.result
    }
}
