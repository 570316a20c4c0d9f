//! common の LlmDriver を TextGenerator として使うアダプタ

use crate::ports::outbound::TextGenerator;
use common::error::Error;
use common::llm::{AnyProvider, LlmDriver};

pub struct LlmTextGenerator {
    driver: LlmDriver<AnyProvider>,
}

impl LlmTextGenerator {
    pub fn new(driver: LlmDriver<AnyProvider>) -> Self {
        Self { driver }
    }
}

impl TextGenerator for LlmTextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.driver.query(prompt)
    }
}
