//! Outbound ポート: アプリが外界（保存先・生成サービス・広告・共有・確認）を使うための trait

pub mod ad_display;
pub mod confirmation;
pub mod dream_repository;
pub mod share_target;
pub mod text_generator;

pub use ad_display::AdDisplay;
pub use confirmation::Confirmation;
pub use dream_repository::DreamRepository;
pub use share_target::ShareTarget;
pub use text_generator::TextGenerator;
