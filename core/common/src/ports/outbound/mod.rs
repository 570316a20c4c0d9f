//! Outbound ポート: アプリが外界（FS・時刻・環境変数・プロセス・ストア・ログ）を使うための trait

pub mod clock;
pub mod env_resolver;
pub mod fs;
pub mod id_generator;
pub mod kv_store;
pub mod log;
pub mod process;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use fs::{FileMetadata, FileSystem};
pub use id_generator::IdGenerator;
pub use kv_store::KeyValueStore;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use process::Process;
