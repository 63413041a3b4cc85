use std::{
    env,
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{anyhow, Context, Result};
use reader_core::{
    config::{self, Settings},
    layout::Size,
    resources::Resources,
    state::{load_state, save_state},
    text::TextFile,
    types::AppStateRecord,
    TextView,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ui::app::{App, ReaderSession};

const USAGE: &str = "Usage: librarian <path-to-book> [--page N]";

struct Args {
    path: PathBuf,
    page: Option<usize>,
}

fn main() {
    let settings = Settings::load();
    init_tracing(&settings);
    if let Err(err) = run(&settings) {
        error!("{err:?}");
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let document = TextFile::open(&args.path)
        .and_then(|file| file.to_document())
        .with_context(|| format!("failed to open {}", args.path.display()))?;
    let book = document.info.book_id();
    info!(
        path = %args.path.display(),
        title = ?document.info.title,
        blocks = document.blocks.len(),
        toc = document.toc_entries.len(),
        "opened book"
    );

    let record = load_state(&book).unwrap_or_else(|| AppStateRecord::new(book.clone()));
    info!(
        location = ?record.last_location,
        bookmarks = record.bookmarks.len(),
        "restored reading state"
    );

    // Real dimensions are applied once the terminal is up.
    let initial = Size {
        width: settings.column_width,
        height: 24,
    };
    let mut session = ReaderSession::new(document, record, Resources::load(), initial);
    if let Some(page) = args.page {
        session.view_mut().goto_page(page);
    }

    let record = App::new(session, settings)
        .run()
        .context("terminal UI failed")?;
    if let Err(err) = save_state(&record) {
        warn!("could not save reading state: {err}");
    }
    info!(location = ?record.last_location, "saved reading state");
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut path = None;
    let mut page = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--page" | "-p" => {
                let value = args.next().ok_or_else(|| anyhow!(USAGE))?;
                let parsed = value
                    .parse::<usize>()
                    .with_context(|| format!("invalid page number: {value}"))?;
                page = Some(parsed);
            }
            "--help" | "-h" => return Err(anyhow!(USAGE)),
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return Err(anyhow!(USAGE)),
        }
    }
    let path = path.ok_or_else(|| anyhow!(USAGE))?;
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }
    Ok(Args { path, page })
}

/// Logs go to `<config>/librarian.log` since the terminal belongs to the UI.
fn init_tracing(settings: &Settings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_str()));
    let log_file = config::config_root().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("librarian.log"))
            .ok()
    });
    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(Mutex::new(file))
                    .with_filter(env_filter),
            )
            .init(),
        None => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_filter(env_filter),
            )
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_path_and_page() {
        let dir = tempfile::tempdir().unwrap();
        let book = dir.path().join("book.txt");
        fs::write(&book, "text").unwrap();
        let parsed = parse_args(args(&[book.to_str().unwrap(), "--page", "12"])).unwrap();
        assert_eq!(parsed.path, book);
        assert_eq!(parsed.page, Some(12));
    }

    #[test]
    fn rejects_missing_or_bad_arguments() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["/definitely/not/here.txt"])).is_err());
        let dir = tempfile::tempdir().unwrap();
        let book = dir.path().join("book.txt");
        fs::write(&book, "text").unwrap();
        let path = book.to_str().unwrap();
        assert!(parse_args(args(&[path, "--page", "x"])).is_err());
        assert!(parse_args(args(&[path, "--page"])).is_err());
        assert!(parse_args(args(&[path, "extra"])).is_err());
    }
}
