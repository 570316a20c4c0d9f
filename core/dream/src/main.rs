mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

use std::io::{self, IsTerminal, Read, Write};
use std::process;

use cli::{config_to_command, parse_args, print_completion, run_browser, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::command::Command;
use domain::DreamRecord;
use ports::inbound::UseCaseRunner;
use usecase::{DeleteOutcome, DiaryBrowser, InterpretOutcome};
use wiring::{wire_dream, App, WiringOptions};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, command: Command) -> Result<i32, Error> {
        match command {
            Command::Help => {
                print_help();
                Ok(0)
            }
            Command::Analyze { text, share } => {
                let text = match text {
                    Some(t) => t,
                    None => read_dream_from_stdin()?,
                };
                let outcome = self.app.interpret_use_case.interpret(&text)?;
                print_interpretation(&outcome);
                if share && !self.app.interpret_use_case.share(&outcome.record) {
                    eprintln!("dream: warning: sharing failed");
                }
                Ok(0)
            }
            Command::DiaryList => {
                let listing = self.app.diary_use_case.list();
                if let Some(w) = &listing.warning {
                    eprintln!("dream: warning: {}", w);
                }
                print_diary_list(&listing.records);
                Ok(0)
            }
            Command::DiaryShow { key } => {
                let record = self.app.diary_use_case.show(&key)?;
                print_record(&record);
                Ok(0)
            }
            Command::DiaryDelete { key } => match self.app.diary_use_case.delete(&key)? {
                DeleteOutcome::Deleted(remaining) => {
                    println!("Deleted. {} dream(s) left.", remaining.len());
                    Ok(0)
                }
                DeleteOutcome::Cancelled => {
                    println!("Cancelled.");
                    Ok(1)
                }
                DeleteOutcome::NotFound => Err(Error::invalid_argument(format!(
                    "No dream found for '{}'",
                    key
                ))),
            },
            Command::DiaryShare { key } => {
                if self.app.diary_use_case.share(&key)? {
                    Ok(0)
                } else {
                    eprintln!("dream: warning: sharing failed");
                    Ok(1)
                }
            }
            Command::DiaryBrowse => {
                let mut browser = DiaryBrowser::open(&self.app.diary_use_case);
                let mut read_line = || {
                    let mut line = String::new();
                    match io::stdin().read_line(&mut line) {
                        Ok(0) | Err(_) => None,
                        Ok(_) => Some(line),
                    }
                };
                let stdout = io::stdout();
                let mut out = stdout.lock();
                run_browser(&mut browser, &mut read_line, &mut out)?;
                Ok(0)
            }
            Command::Learn { section } => {
                match section {
                    Some(n) => print_section(self.app.learning_use_case.section(n)?),
                    None => {
                        for (i, s) in self.app.learning_use_case.sections().iter().enumerate() {
                            if i > 0 {
                                println!();
                            }
                            print_section(s);
                        }
                    }
                }
                Ok(0)
            }
            Command::Unknown(name) => Err(Error::invalid_argument(format!(
                "Command '{}' is not implemented.",
                name
            ))),
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("dream: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: dream [-h] [-v] [-d|--home-dir directory] [--provider name] [--model model] <command> [args...]");
}

fn print_help() {
    println!("Usage: dream [-h] [-v] [-d|--home-dir directory] [--provider name] [--model model] <command> [args...]");
    println!("  -h, --help            Display this help message.");
    println!("  -v, --verbose         Mirror log records to stderr (for troubleshooting).");
    println!("  -d, --home-dir        Specify a home directory (sets DREAM_HOME for this process).");
    println!("  --provider <name>     Interpretation provider: gemini (default) or echo.");
    println!("  --model <model>       Model name (default: gemini-1.5-flash).");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish).");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY        API key (EXPO_PUBLIC_GEMINI_API_KEY is also read). A .env file is loaded.");
    println!("  DREAM_HOME            Home directory (config, data, state). Default: XDG directories.");
    println!();
    println!("Commands:");
    println!("  analyze [--share] [text...]   Interpret a dream and save it (reads stdin without text).");
    println!("  diary list                    List saved dreams, newest first.");
    println!("  diary show <id|date>          Show one dream with its interpretation.");
    println!("  diary delete <id|date> [--yes] Delete a dream after confirmation.");
    println!("  diary share <id|date>         Share a dream and its interpretation.");
    println!("  diary browse                  Interactive diary browser.");
    println!("  learn [n]                     Lucid dreaming, dream recall and dream types.");
}

fn read_dream_from_stdin() -> Result<String, Error> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Describe your dream, then press Ctrl-D:");
    }
    read_dream(&mut stdin)
}

/// 入力を最後まで読み、末尾の改行・空白を落とす
fn read_dream(input: &mut dyn Read) -> Result<String, Error> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .map_err(|e| Error::system(format!("failed to read stdin: {}", e)))?;
    text.truncate(text.trim_end().len());
    Ok(text)
}

fn print_interpretation(outcome: &InterpretOutcome) {
    println!("Interpretation:");
    println!("{}", outcome.record.interpretation);
    if outcome.saved {
        println!();
        println!("Saved to diary as {}.", outcome.record.id);
    } else {
        eprintln!("dream: warning: the interpretation could not be saved to the diary");
    }
}

fn print_diary_list(records: &[DreamRecord]) {
    if records.is_empty() {
        println!("(no dreams)");
        return;
    }
    println!("{:8}  {:<18} {}", "ID", "DATE", "DREAM");
    for r in records {
        let first_line = r.dream.lines().next().unwrap_or_default();
        let dream = if first_line.chars().count() > 50 {
            format!("{}...", first_line.chars().take(47).collect::<String>())
        } else {
            first_line.to_string()
        };
        println!("{:8}  {:<18} {}", r.key(), r.display_date(), dream);
    }
}

fn print_record(record: &DreamRecord) {
    println!("{}  ({})", record.display_date(), record.key());
    println!();
    println!("Dream:");
    println!("{}", record.dream);
    println!();
    println!("Interpretation:");
    println!("{}", record.interpretation);
}

fn print_section(section: &domain::LearningSection) {
    println!("{}", section.title);
    for item in section.items {
        println!("  {}", item);
    }
}

fn wiring_options(config: &Config) -> WiringOptions {
    WiringOptions {
        verbose: config.verbose,
        provider: config.provider.clone(),
        model: config.model.clone(),
        assume_yes: config.yes,
    }
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let command = config_to_command(&config);
    if command == Command::Help {
        print_help();
        return Ok(0);
    }
    // -d/--home-dir 指定時は DREAM_HOME を設定し、resolve_dirs() がその配下を使うようにする
    if let Some(ref h) = config.home_dir {
        std::env::set_var("DREAM_HOME", h);
    }
    let app = wire_dream(&wiring_options(&config))?;
    let logger = app.logger.clone();
    let name = config.command_name.clone().unwrap_or_default();
    let _ = logger.log(
        &LogRecord::new(LogLevel::Info, "command start")
            .layer("cli")
            .kind("lifecycle")
            .field("command", name.as_str()),
    );
    let runner = Runner { app };
    let result = runner.run(command);
    let _ = io::stdout().flush();
    let end = match &result {
        Ok(code) => LogRecord::new(LogLevel::Info, "command end").field("exit_code", *code),
        Err(e) => LogRecord::new(LogLevel::Error, "command failed")
            .field("exit_code", e.exit_code())
            .field("error", e.to_string()),
    };
    let _ = logger.log(
        &end.layer("cli")
            .kind("lifecycle")
            .field("command", name.as_str()),
    );
    result
}
