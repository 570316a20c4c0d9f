//! dream 共通ライブラリ
//!
//! `dream` コマンドが使うエラー型・ポート・標準アダプタ・生成テキストプロバイダを提供します。

/// 標準アダプタ
pub mod adapter;

/// config.json の設定型
pub mod config;

/// ドメイン型（Newtype）
pub mod domain;

/// エラーハンドリング
pub mod error;

/// 生成テキストのドライバーとプロバイダ
pub mod llm;

/// Outbound ポート
pub mod ports;
