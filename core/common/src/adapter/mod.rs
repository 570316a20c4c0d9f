//! アダプター（外界の I/O を ports の trait で実装）
//!
//! usecase は ports::outbound の trait 経由でのみファイル・時刻・プロセスに触れる。
//! ここには標準実装（Std*）とテスト・オフライン用の実装を置く。

pub mod file_json_log;
pub mod file_kv_store;
pub mod memory_kv_store;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;
pub mod std_id_generator;
pub mod std_process;

pub use file_json_log::{FanoutLog, FileJsonLog, NoopLog, StderrLog};
pub use file_kv_store::FileKeyValueStore;
pub use memory_kv_store::MemoryKeyValueStore;
pub use std_clock::{FixedClock, StdClock};
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use std_id_generator::StdIdGenerator;
pub use std_process::StdProcess;
