//! CLI 境界（引数解析・補完スクリプト・対話ブラウザ）

mod args;
mod browse;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
pub use browse::run_browser;
