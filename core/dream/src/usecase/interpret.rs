//! 夢の解釈ユースケース
//!
//! 広告ポリシー → 入力チェック → プロンプト組み立て → 生成 → 記録の保存 の順に進む。

use crate::domain::{iso8601_from_ms, DreamRecord, ShareMessage};
use crate::ports::outbound::{DreamRepository, ShareTarget, TextGenerator};
use crate::usecase::AdScheduler;
use common::error::Error;
use common::llm::factory::MISSING_API_KEY_MESSAGE;
use common::ports::outbound::{Clock, IdGenerator, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 生成サービスへ送る前置き
pub const PREAMBLE: &str = "You are an expert dream interpreter with deep knowledge of:
- Jungian psychology and archetypes
- Cultural dream symbolism across different societies
- Modern psychological dream analysis
- Traditional dream interpretation techniques

Analyze the dream considering:
1. Universal symbols and their meanings
2. Personal context and emotions
3. Archetypal patterns
4. Potential psychological insights

Provide a thoughtful, insightful interpretation that helps understand the dream's deeper meaning. Be specific but avoid being overly deterministic.";

/// 生成結果が空だった時の代替文
pub const FALLBACK_INTERPRETATION: &str =
    "I apologize, but I couldn't generate an interpretation at this time. Please try again.";

/// リモートからエラーメッセージが得られなかった時の文言
pub const GENERIC_FAILURE: &str = "Failed to analyze dream. Please try again.";

/// 前置きと夢の本文からプロンプトを作る
pub fn build_prompt(dream_text: &str) -> String {
    format!("{}\n\nPlease interpret this dream: {}", PREAMBLE, dream_text)
}

/// 解釈の結果。saved == false は保存に失敗したが解釈は得られたことを表す
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretOutcome {
    pub record: DreamRecord,
    pub saved: bool,
}

pub struct InterpretUseCase {
    ads: AdScheduler,
    generator: Option<Arc<dyn TextGenerator>>,
    repo: Arc<dyn DreamRepository>,
    share: Arc<dyn ShareTarget>,
    clock: Arc<dyn Clock>,
    id_gen: Arc<dyn IdGenerator>,
    log: Arc<dyn Log>,
}

impl InterpretUseCase {
    /// generator が None のときは API キー未設定として扱う
    pub fn new(
        ads: AdScheduler,
        generator: Option<Arc<dyn TextGenerator>>,
        repo: Arc<dyn DreamRepository>,
        share: Arc<dyn ShareTarget>,
        clock: Arc<dyn Clock>,
        id_gen: Arc<dyn IdGenerator>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            ads,
            generator,
            repo,
            share,
            clock,
            id_gen,
            log,
        }
    }

    pub fn interpret(&self, dream_text: &str) -> Result<InterpretOutcome, Error> {
        self.ads.tick();

        if dream_text.trim().is_empty() {
            return Err(Error::invalid_argument("Please describe your dream first."));
        }
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| Error::configuration(MISSING_API_KEY_MESSAGE))?;

        let prompt = build_prompt(dream_text);
        let generated = generator.generate(&prompt).map_err(|e| {
            let keep = match &e {
                Error::Configuration(_) => true,
                Error::RemoteService(m) => !m.trim().is_empty(),
                _ => false,
            };
            let mapped = if keep { e } else { Error::remote(GENERIC_FAILURE) };
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Error, "interpretation failed")
                    .layer("usecase")
                    .kind("interpret")
                    .field("error", mapped.to_string()),
            );
            mapped
        })?;

        let interpretation = if generated.trim().is_empty() {
            FALLBACK_INTERPRETATION.to_string()
        } else {
            generated
        };
        let record = DreamRecord::new(
            self.id_gen.next_id(),
            iso8601_from_ms(self.clock.now_ms())?,
            dream_text,
            interpretation,
        );

        match self.repo.append(&record) {
            Ok(stored) => Ok(InterpretOutcome {
                record: stored,
                saved: true,
            }),
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Error, "interpretation not saved")
                        .layer("usecase")
                        .kind("storage")
                        .field("dream_id", record.id.to_string())
                        .field("error", e.to_string()),
                );
                Ok(InterpretOutcome {
                    record,
                    saved: false,
                })
            }
        }
    }

    /// 解釈直後の結果を共有する。失敗はログに残して false
    pub fn share(&self, record: &DreamRecord) -> bool {
        let msg = ShareMessage::for_interpretation(&record.dream, &record.interpretation);
        match self.share.share(msg.title.as_deref(), &msg.message) {
            Ok(()) => true,
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "share failed")
                        .layer("usecase")
                        .kind("share")
                        .field("error", e.to_string()),
                );
                false
            }
        }
    }
}
