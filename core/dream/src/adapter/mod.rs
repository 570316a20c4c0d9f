//! アダプター（ports::outbound の trait を外界の I/O で実装）

pub(crate) mod ad_display;
pub(crate) mod confirmation;
pub(crate) mod dream_store;
pub(crate) mod llm_text_generator;
pub(crate) mod logging_dream_repository;
pub(crate) mod share;

pub(crate) use ad_display::{default_ad_unit_id, ConsoleAdDisplay, NoopAdDisplay};
pub(crate) use confirmation::{AssumeYesConfirmation, CliConfirmation, NonInteractiveConfirmation};
pub(crate) use dream_store::DreamStore;
pub(crate) use llm_text_generator::LlmTextGenerator;
pub(crate) use logging_dream_repository::LoggingDreamRepository;
pub(crate) use share::{CommandShare, StdoutShare};
