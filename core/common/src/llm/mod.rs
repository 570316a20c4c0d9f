//! 生成テキストプロバイダとドライバー
//!
//! このモジュールは、異なるプロバイダ（Gemini、Echo）で共通する処理を提供します。

pub mod driver;
pub mod echo;
pub mod factory;
pub mod gemini;
pub mod provider;
pub mod resolver;

pub use driver::LlmDriver;
pub use factory::{create_driver, create_provider, AnyProvider, ProviderType};
pub use provider::LlmProvider;
pub use resolver::{resolve_provider, ResolvedProvider};
