//! ドメイン型（夢の記録、コマンド、学習コンテンツ、共有メッセージ）

pub mod approval;
pub mod command;
pub mod learning;
pub mod record;
pub mod share;

pub use approval::Approval;
pub use learning::{LearningSection, SECTIONS};
pub use record::{format_date, iso8601_from_ms, DreamRecord};
pub use share::ShareMessage;
