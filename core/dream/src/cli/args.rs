use crate::domain::command::Command;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;

/// CLI から受け取った生の設定（command は文字列のまま保持）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    pub verbose: bool,
    pub home_dir: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    /// diary delete --yes
    pub yes: bool,
    /// analyze --share
    pub share: bool,
    /// コマンド名（None の場合は Help）
    pub command_name: Option<String>,
    pub command_args: Vec<String>,
}

/// 解析結果: 通常の Config または補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn global_args(cmd: clap::Command) -> clap::Command {
    cmd.disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror log records to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("home-dir")
                .short('d')
                .long("home-dir")
                .value_name("directory")
                .help("Specify a home directory (sets DREAM_HOME for this process)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("provider")
                .long("provider")
                .value_name("name")
                .help("Interpretation provider (gemini, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .long("model")
                .value_name("model")
                .help("Model name (default: gemini-1.5-flash)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn key_arg() -> clap::Arg {
    clap::Arg::new("key")
        .value_name("id|date")
        .required(true)
        .num_args(1)
}

fn build_diary_subcommand() -> clap::Command {
    clap::Command::new("diary")
        .about("Browse saved dreams")
        .subcommand(clap::Command::new("list").about("List saved dreams, newest first"))
        .subcommand(
            clap::Command::new("show")
                .about("Show one dream with its interpretation")
                .arg(key_arg()),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Delete a dream after confirmation")
                .arg(key_arg())
                .arg(
                    clap::Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Do not ask for confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("share")
                .about("Share a dream and its interpretation")
                .arg(key_arg()),
        )
        .subcommand(clap::Command::new("browse").about("Interactive diary browser"))
}

fn build_clap_command() -> clap::Command {
    global_args(
        clap::Command::new("dream")
            .about("Dream journal with automated interpretation")
            .subcommand_required(false)
            .disable_help_subcommand(true)
            .subcommand(clap::Command::new("help").about("Display this help message"))
            .subcommand(
                clap::Command::new("analyze")
                    .about("Interpret a dream and save it to the diary (reads stdin without text)")
                    .arg(
                        clap::Arg::new("share")
                            .long("share")
                            .help("Share the interpretation afterwards")
                            .action(ArgAction::SetTrue),
                    )
                    .arg(
                        clap::Arg::new("text")
                            .value_name("text")
                            .num_args(1..)
                            .trailing_var_arg(true),
                    ),
            )
            .subcommand(build_diary_subcommand())
            .subcommand(
                clap::Command::new("learn")
                    .about("Lucid dreaming, dream recall and dream types")
                    .arg(clap::Arg::new("section").value_name("n")),
            ),
    )
}

fn strings(m: &clap::ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|i| i.cloned().collect())
        .unwrap_or_default()
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let help = matches.get_flag("help") || matches.subcommand_matches("help").is_some();
    let mut yes = false;
    let mut share = false;

    let (command_name, command_args) = match matches.subcommand() {
        None | Some(("help", _)) => (None, Vec::new()),
        Some(("analyze", m)) => {
            share = m.get_flag("share");
            (Some("analyze".to_string()), strings(m, "text"))
        }
        Some(("diary", diary_m)) => {
            let args = match diary_m.subcommand() {
                None => vec!["list".to_string()],
                Some((sub, m)) => {
                    if sub == "delete" {
                        yes = m.get_flag("yes");
                    }
                    let mut args = vec![sub.to_string()];
                    if sub != "list" && sub != "browse" {
                        args.extend(strings(m, "key"));
                    }
                    args
                }
            };
            (Some("diary".to_string()), args)
        }
        Some(("learn", m)) => (Some("learn".to_string()), strings(m, "section")),
        Some((name, _)) => (Some(name.to_string()), Vec::new()),
    };

    Config {
        help,
        verbose: matches.get_flag("verbose"),
        home_dir: matches.get_one::<String>("home-dir").cloned(),
        provider: matches.get_one::<String>("provider").cloned(),
        model: matches.get_one::<String>("model").cloned(),
        yes,
        share,
        command_name,
        command_args,
    }
}

/// 引数列を解析する（先頭はプログラム名）
pub fn parse_args_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args_os())
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "dream", &mut std::io::stdout());
}

/// Config を Command に変換する
pub fn config_to_command(config: &Config) -> Command {
    if config.help {
        return Command::Help;
    }
    match &config.command_name {
        Some(name) => Command::parse_with_args(name, &config.command_args, config.share),
        None => Command::Help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        match parse_args_from(args.iter().copied()).unwrap() {
            ParseOutcome::Config(c) => c,
            ParseOutcome::GenerateCompletion(_) => panic!("unexpected completion"),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.help);
        assert_eq!(config.home_dir, None);
        assert_eq!(config.command_name, None);
        assert_eq!(config.command_args.len(), 0);
    }

    #[test]
    fn test_no_command_is_help() {
        assert_eq!(config_to_command(&config(&["dream"])), Command::Help);
        assert_eq!(config_to_command(&config(&["dream", "-h"])), Command::Help);
    }

    #[test]
    fn test_analyze_with_text_and_globals() {
        let c = config(&["dream", "-v", "--provider", "echo", "analyze", "--share", "I", "was", "flying"]);
        assert!(c.verbose);
        assert_eq!(c.provider.as_deref(), Some("echo"));
        assert_eq!(
            config_to_command(&c),
            Command::Analyze {
                text: Some("I was flying".to_string()),
                share: true
            }
        );
    }

    #[test]
    fn test_diary_subcommands() {
        assert_eq!(config_to_command(&config(&["dream", "diary"])), Command::DiaryList);
        assert_eq!(
            config_to_command(&config(&["dream", "diary", "show", "0000abcd"])),
            Command::DiaryShow {
                key: "0000abcd".to_string()
            }
        );
        let c = config(&["dream", "diary", "delete", "0000abcd", "--yes"]);
        assert!(c.yes);
        assert_eq!(
            config_to_command(&c),
            Command::DiaryDelete {
                key: "0000abcd".to_string()
            }
        );
        assert_eq!(
            config_to_command(&config(&["dream", "diary", "browse"])),
            Command::DiaryBrowse
        );
    }

    #[test]
    fn test_learn_section() {
        assert_eq!(
            config_to_command(&config(&["dream", "learn", "3"])),
            Command::Learn { section: Some(3) }
        );
    }

    #[test]
    fn test_home_dir() {
        let c = config(&["dream", "-d", "/tmp/dh", "diary", "list"]);
        assert_eq!(c.home_dir.as_deref(), Some("/tmp/dh"));
    }

    #[test]
    fn test_generate_completion() {
        assert!(matches!(
            parse_args_from(["dream", "--generate", "bash"]).unwrap(),
            ParseOutcome::GenerateCompletion(Shell::Bash)
        ));
    }

    #[test]
    fn test_missing_key_is_usage_error() {
        let e = parse_args_from(["dream", "diary", "show"]).unwrap_err();
        assert!(e.is_usage());
    }
}
