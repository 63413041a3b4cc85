use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Text,
    Markdown,
    #[serde(other)]
    Other,
}

fn default_format() -> DocumentFormat {
    DocumentFormat::Text
}

/// Position in the text flow: the word `word` of block `paragraph`, and the
/// grapheme `grapheme` inside that word.
///
/// Ordering follows reading order, so cursors can be compared directly.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Cursor {
    pub paragraph: usize,
    pub word: usize,
    /// Non-zero only where a word too long for one line was split.
    #[serde(default)]
    pub grapheme: usize,
}

impl Cursor {
    pub const fn new(paragraph: usize, word: usize) -> Self {
        Self {
            paragraph,
            word,
            grapheme: 0,
        }
    }

    pub const fn with_grapheme(self, grapheme: usize) -> Self {
        Self { grapheme, ..self }
    }
}

/// Current page (1-based) and total page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePosition {
    pub current: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    Heading(String, u8),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Paragraph(t) | Block::Heading(t, _) => t,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    pub label: String,
    pub cursor: Cursor,
}

#[derive(Clone, Debug)]
pub struct DocumentInfo {
    pub id: String,
    pub path: String,
    pub title: Option<String>,
    pub format: DocumentFormat,
}

impl DocumentInfo {
    pub fn book_id(&self) -> BookId {
        BookId {
            id: self.id.clone(),
            path: self.path.clone(),
            title: self.title.clone(),
            format: self.format,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Document {
    pub info: DocumentInfo,
    pub blocks: Vec<Block>,
    pub toc_entries: Vec<TocEntry>,
}

impl Document {
    pub fn new(info: DocumentInfo, blocks: Vec<Block>, toc_entries: Vec<TocEntry>) -> Self {
        Self {
            info,
            blocks,
            toc_entries,
        }
    }

    /// Last TOC entry at or before `cursor`.
    pub fn toc_entry_at(&self, cursor: Cursor) -> Option<&TocEntry> {
        self.toc_entries
            .iter()
            .take_while(|entry| entry.cursor <= cursor)
            .last()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookId {
    pub id: String,   // sha256 of the file contents
    pub path: String, // absolute path
    pub title: Option<String>,
    #[serde(default = "default_format")]
    pub format: DocumentFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    pub location: Cursor,
    /// Invisible bookmarks are recorded implicitly, e.g. when leaving a jump.
    #[serde(default)]
    pub visible: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStateRecord {
    pub book: BookId,
    pub last_location: Cursor,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

impl AppStateRecord {
    pub fn new(book: BookId) -> Self {
        Self {
            book,
            last_location: Cursor::default(),
            bookmarks: Vec::new(),
        }
    }
}
