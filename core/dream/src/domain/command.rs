//! dream コマンドの enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、main の Runner で match する。

/// dream のサブコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// ヘルプ表示（コマンド未指定時も）
    Help,

    /// 夢を解釈して日記に保存する。text が None なら標準入力から読む
    Analyze { text: Option<String>, share: bool },

    /// 日記の一覧（新しい順）
    DiaryList,
    /// 1 件を全文表示（id または date）
    DiaryShow { key: String },
    /// 確認のうえ削除
    DiaryDelete { key: String },
    /// 共有先へ渡す
    DiaryShare { key: String },
    /// 対話的な日記ブラウザ
    DiaryBrowse,

    /// 学習コンテンツ（番号指定で 1 セクションのみ、1 始まり）
    Learn { section: Option<usize> },

    /// 未知のコマンド（エラー用）
    Unknown(String),
}

impl Command {
    /// コマンド名と引数から Command に解析する
    pub fn parse_with_args(name: &str, args: &[String], share: bool) -> Self {
        match name {
            "help" => Command::Help,
            "analyze" => Command::Analyze {
                text: if args.is_empty() || (args.len() == 1 && args[0] == "-") {
                    None
                } else {
                    Some(args.join(" "))
                },
                share,
            },
            "diary" => Self::parse_diary(args),
            "learn" => match args.first() {
                None => Command::Learn { section: None },
                Some(n) => match n.parse::<usize>() {
                    Ok(section) => Command::Learn {
                        section: Some(section),
                    },
                    Err(_) => Command::Unknown(format!("learn {}", n)),
                },
            },
            other => Command::Unknown(other.to_string()),
        }
    }

    fn parse_diary(args: &[String]) -> Self {
        let sub = args.first().map(String::as_str).unwrap_or("list");
        let key = args.get(1).cloned();
        match (sub, key) {
            ("list", _) => Command::DiaryList,
            ("browse", _) => Command::DiaryBrowse,
            ("show", Some(key)) => Command::DiaryShow { key },
            ("delete", Some(key)) => Command::DiaryDelete { key },
            ("share", Some(key)) => Command::DiaryShare { key },
            (sub, _) => Command::Unknown(format!("diary {}", sub)),
        }
    }
}
