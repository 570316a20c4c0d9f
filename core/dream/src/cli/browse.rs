//! 行単位の対話的な日記ブラウザ
//!
//! 番号で展開/折りたたみ、`d N` で削除、`s N` で共有、`q` で終了。

use crate::domain::DreamRecord;
use crate::usecase::{DeleteOutcome, DiaryBrowser};
use common::error::Error;
use std::io::Write;

const PREVIEW_CHARS: usize = 60;
const HELP_LINE: &str = "[N] expand/collapse  [d N] delete  [s N] share  [q] quit";

#[derive(Debug, PartialEq, Eq)]
enum BrowseInput {
    Toggle(usize),
    Delete(usize),
    Share(usize),
    Quit,
    Redraw,
    Invalid,
}

fn parse_input(line: &str) -> BrowseInput {
    let mut parts = line.split_whitespace();
    let (first, second) = (parts.next(), parts.next());
    if parts.next().is_some() {
        return BrowseInput::Invalid;
    }
    let index = |s: Option<&str>| s.and_then(|n| n.parse::<usize>().ok());
    match (first, second) {
        (None, _) => BrowseInput::Redraw,
        (Some("q"), None) | (Some("quit"), None) => BrowseInput::Quit,
        (Some("d"), n) => index(n).map_or(BrowseInput::Invalid, BrowseInput::Delete),
        (Some("s"), n) => index(n).map_or(BrowseInput::Invalid, BrowseInput::Share),
        (n, None) => index(n).map_or(BrowseInput::Invalid, BrowseInput::Toggle),
        _ => BrowseInput::Invalid,
    }
}

fn preview(text: &str) -> String {
    let one_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if one_line.chars().count() > PREVIEW_CHARS {
        let cut: String = one_line.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{}...", cut)
    } else {
        one_line
    }
}

fn io_err(e: std::io::Error) -> Error {
    Error::system(e.to_string())
}

fn render(browser: &DiaryBrowser<'_>, out: &mut dyn Write) -> Result<(), Error> {
    let records = browser.records();
    if records.is_empty() {
        writeln!(out, "No dreams recorded yet").map_err(io_err)?;
        return Ok(());
    }
    writeln!(out, "Dream Diary ({})", records.len()).map_err(io_err)?;
    for (i, r) in records.iter().enumerate() {
        render_record(i + 1, r, browser.is_expanded(r), out)?;
    }
    writeln!(out, "{}", HELP_LINE).map_err(io_err)
}

fn render_record(n: usize, r: &DreamRecord, expanded: bool, out: &mut dyn Write) -> Result<(), Error> {
    if !expanded {
        return writeln!(out, "  {:>2}. {}  {}", n, r.display_date(), preview(&r.dream)).map_err(io_err);
    }
    writeln!(out, "v {:>2}. {}", n, r.display_date()).map_err(io_err)?;
    writeln!(out, "      Dream:").map_err(io_err)?;
    for line in r.dream.lines() {
        writeln!(out, "        {}", line).map_err(io_err)?;
    }
    writeln!(out, "      Interpretation:").map_err(io_err)?;
    for line in r.interpretation.lines() {
        writeln!(out, "        {}", line).map_err(io_err)?;
    }
    Ok(())
}

/// 1-based の番号を記録のキーにする
fn key_at(browser: &DiaryBrowser<'_>, n: usize) -> Option<String> {
    n.checked_sub(1)
        .and_then(|i| browser.records().get(i))
        .map(|r| r.key().to_string())
}

/// `read_line` が None を返すか `q` が入力されるまで対話する
pub fn run_browser(
    browser: &mut DiaryBrowser<'_>,
    read_line: &mut dyn FnMut() -> Option<String>,
    out: &mut dyn Write,
) -> Result<(), Error> {
    if let Some(w) = browser.warning() {
        writeln!(out, "warning: {}", w).map_err(io_err)?;
    }
    render(browser, out)?;
    while let Some(line) = read_line() {
        let input = parse_input(&line);
        let n = match input {
            BrowseInput::Quit => break,
            BrowseInput::Redraw => {
                render(browser, out)?;
                continue;
            }
            BrowseInput::Invalid => {
                writeln!(out, "{}", HELP_LINE).map_err(io_err)?;
                continue;
            }
            BrowseInput::Toggle(n) | BrowseInput::Delete(n) | BrowseInput::Share(n) => n,
        };
        let key = match key_at(browser, n) {
            Some(k) => k,
            None => {
                writeln!(out, "No dream #{}", n).map_err(io_err)?;
                continue;
            }
        };
        match input {
            BrowseInput::Toggle(_) => browser.toggle_expand(&key),
            // 保存の失敗は報告して閲覧を続ける
            BrowseInput::Delete(_) => match browser.delete(&key) {
                Ok(DeleteOutcome::Deleted(_)) => writeln!(out, "Deleted.").map_err(io_err)?,
                Ok(DeleteOutcome::Cancelled) => writeln!(out, "Cancelled.").map_err(io_err)?,
                Ok(DeleteOutcome::NotFound) => writeln!(out, "Already deleted.").map_err(io_err)?,
                Err(e) => writeln!(out, "warning: could not delete dream: {}", e).map_err(io_err)?,
            },
            BrowseInput::Share(_) => match browser.share(&key) {
                Ok(true) => {}
                Ok(false) => writeln!(out, "Sharing failed.").map_err(io_err)?,
                Err(e) => writeln!(out, "warning: could not share dream: {}", e).map_err(io_err)?,
            },
            _ => {}
        }
        render(browser, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::DreamStore;
    use crate::ports::outbound::DreamRepository;
    use crate::usecase::test_support::{RecordingShare, StubConfirmation};
    use crate::usecase::DiaryUseCase;
    use common::adapter::{MemoryKeyValueStore, NoopLog};
    use common::domain::RecordId;
    use common::ports::outbound::KeyValueStore;
    use std::sync::Arc;

    fn diary(share: Arc<RecordingShare>) -> DiaryUseCase {
        let repo = Arc::new(DreamStore::new(Arc::new(MemoryKeyValueStore::new()), Arc::new(NoopLog)));
        repo.append(&DreamRecord::new(
            RecordId::new("00000001"),
            "2024-01-01T12:00:00.000Z",
            "Falling down stairs",
            "Loss of control.",
        ))
        .unwrap();
        repo.append(&DreamRecord::new(
            RecordId::new("00000002"),
            "2024-01-02T12:00:00.000Z",
            "Flying",
            "Freedom.",
        ))
        .unwrap();
        DiaryUseCase::new(repo, Arc::new(StubConfirmation::approved()), share, Arc::new(NoopLog))
    }

    fn run(d: &DiaryUseCase, lines: &[&str]) -> String {
        let mut b = DiaryBrowser::open(d);
        let mut input = lines.iter().map(|s| s.to_string());
        let mut out = Vec::new();
        run_browser(&mut b, &mut || input.next(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("2"), BrowseInput::Toggle(2));
        assert_eq!(parse_input("d 1"), BrowseInput::Delete(1));
        assert_eq!(parse_input(" s  3 "), BrowseInput::Share(3));
        assert_eq!(parse_input("q"), BrowseInput::Quit);
        assert_eq!(parse_input(""), BrowseInput::Redraw);
        assert_eq!(parse_input("d"), BrowseInput::Invalid);
        assert_eq!(parse_input("x 1 2"), BrowseInput::Invalid);
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("a\nb"), "a b");
        let long = "x".repeat(100);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_expand_shows_interpretation() {
        let out = run(&diary(Arc::new(RecordingShare::default())), &["1", "q"]);
        assert!(out.contains("Dream Diary (2)"));
        assert!(out.contains("v  1. January 2, 2024"));
        assert!(out.contains("        Freedom."));
    }

    #[test]
    fn test_delete_then_share() {
        let share = Arc::new(RecordingShare::default());
        let d = diary(share.clone());
        let out = run(&d, &["d 1", "s 1"]);
        assert!(out.contains("Deleted."));
        assert!(out.contains("Dream Diary (1)"));
        let messages = share.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0.as_deref(), Some("Dream from January 1, 2024"));
    }

    #[test]
    fn test_delete_failure_keeps_browsing() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let repo = Arc::new(DreamStore::new(kv.clone(), Arc::new(NoopLog)));
        repo.append(&DreamRecord::new(
            RecordId::new("00000001"),
            "2024-01-01T12:00:00.000Z",
            "Flying",
            "Freedom.",
        ))
        .unwrap();
        let d = DiaryUseCase::new(
            repo,
            Arc::new(StubConfirmation::approved()),
            Arc::new(RecordingShare::default()),
            Arc::new(NoopLog),
        );
        let mut b = DiaryBrowser::open(&d);
        kv.set("dreams", "{ not a list").unwrap();

        let mut input = ["d 1", "1", "q"].iter().map(|s| s.to_string());
        let mut out = Vec::new();
        run_browser(&mut b, &mut || input.next(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("warning: could not delete dream"));
        assert!(out.contains("        Freedom."));
        assert_eq!(b.records().len(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let out = run(&diary(Arc::new(RecordingShare::default())), &["9"]);
        assert!(out.contains("No dream #9"));
    }
}
