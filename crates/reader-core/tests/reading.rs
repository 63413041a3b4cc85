use std::fs;

use reader_core::{
    layout::Size,
    state::{add_bookmark, load_state_from, save_state_to},
    text::TextFile,
    types::{AppStateRecord, Cursor, DocumentFormat},
    PagedView, TextView,
};

const BOOK: &str = "# The Book

Opening words of the book.

## Chapter One

It was a bright cold day in April, and the clocks were striking thirteen.

## Chapter Two

Somewhere far away a dog barked twice and then fell silent.
";

#[test]
fn markdown_file_loads_with_toc_and_paginates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("the-book.md");
    fs::write(&path, BOOK).unwrap();

    let doc = TextFile::open(&path).unwrap().to_document().unwrap();
    assert_eq!(doc.info.format, DocumentFormat::Markdown);
    assert_eq!(doc.info.title.as_deref(), Some("The Book"));
    assert!(doc.info.id.starts_with("sha256:"));
    let labels: Vec<&str> = doc.toc_entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["The Book", "Chapter One", "Chapter Two"]);

    let mut view = PagedView::new(
        &doc.blocks,
        Size {
            width: 30,
            height: 4,
        },
    );
    assert!(view.page_position().total > 2);
    view.goto_end();
    let toc = doc.toc_entry_at(view.start_cursor()).unwrap();
    assert_eq!(toc.label, "Chapter Two");
    view.goto_home();
    assert_eq!(
        doc.toc_entry_at(view.start_cursor()).unwrap().label,
        "The Book"
    );
}

#[test]
fn empty_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "\n\n   \n").unwrap();
    assert!(TextFile::open(&path).unwrap().to_document().is_err());
}

#[test]
fn state_round_trips_with_bookmarks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.txt");
    fs::write(&path, "Some text.\n").unwrap();
    let doc = TextFile::open(&path).unwrap().to_document().unwrap();

    let mut record = AppStateRecord::new(doc.info.book_id());
    record.last_location = Cursor::new(3, 7);
    add_bookmark(&mut record, Cursor::new(1, 0), false);
    save_state_to(dir.path(), &record).unwrap();

    record.last_location = Cursor::new(4, 0);
    save_state_to(dir.path(), &record).unwrap();

    let loaded = load_state_from(dir.path(), &doc.info.book_id()).unwrap();
    assert_eq!(loaded.last_location, Cursor::new(4, 0));
    assert_eq!(loaded.bookmarks.len(), 1);
    assert_eq!(loaded.bookmarks[0].location, Cursor::new(1, 0));
    assert!(!loaded.bookmarks[0].visible);

    let raw = fs::read_to_string(dir.path().join("state.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(records.len(), 1);
}
