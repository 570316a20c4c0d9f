//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: 日記の保存先・文章生成・広告・共有・確認の trait（common の KeyValueStore / Log 等も利用）

pub mod inbound;
pub mod outbound;
