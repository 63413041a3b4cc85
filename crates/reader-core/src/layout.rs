use unicode_segmentation::UnicodeSegmentation;

use crate::types::{Block, Cursor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub heading: bool,
}

impl Line {
    fn blank() -> Self {
        Self {
            text: String::new(),
            heading: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Page {
    pub lines: Vec<Line>,
    /// Cursor of the first word on the page.
    pub start: Cursor,
}

#[derive(Clone, Debug)]
pub struct Pagination {
    pub pages: Vec<Page>,
}

impl Pagination {
    /// Index of the page holding `cursor`.
    ///
    /// A cursor that starts a page maps to the first such page, anything else
    /// maps to the last page starting before it.
    pub fn page_for_cursor(&self, cursor: Cursor) -> usize {
        let idx = self.pages.partition_point(|p| p.start < cursor);
        match self.pages.get(idx) {
            Some(page) if page.start == cursor => idx,
            _ => idx.saturating_sub(1),
        }
    }
}

struct PageBuilder {
    pages: Vec<Page>,
    lines: Vec<Line>,
    start: Option<Cursor>,
    height: usize,
}

impl PageBuilder {
    fn push(&mut self, line: Line, cursor: Option<Cursor>) {
        // A page never begins with a blank separator line.
        if self.lines.is_empty() && cursor.is_none() {
            return;
        }
        if self.start.is_none() {
            self.start = cursor;
        }
        self.lines.push(line);
        if self.lines.len() >= self.height {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        let fallback = self.pages.last().map(|p| p.start).unwrap_or_default();
        self.pages.push(Page {
            lines: std::mem::take(&mut self.lines),
            start: self.start.take().unwrap_or(fallback),
        });
    }

    fn finish(mut self) -> Pagination {
        self.flush();
        if self.pages.is_empty() {
            self.pages.push(Page {
                lines: Vec::new(),
                start: Cursor::default(),
            });
        }
        Pagination { pages: self.pages }
    }
}

/// Greedy word wrap of `blocks` into pages of `size.height` lines.
pub fn paginate(blocks: &[Block], size: Size) -> Pagination {
    let width = usize::from(size.width.max(1));
    let mut builder = PageBuilder {
        pages: Vec::new(),
        lines: Vec::new(),
        start: None,
        height: usize::from(size.height.max(1)),
    };
    for (idx, block) in blocks.iter().enumerate() {
        let heading = matches!(block, Block::Heading(..));
        for (text, word, grapheme) in wrap_words(block.text(), width) {
            let cursor = Cursor::new(idx, word).with_grapheme(grapheme);
            builder.push(Line { text, heading }, Some(cursor));
        }
        // blank line between blocks
        builder.push(Line::blank(), None);
    }
    builder.finish()
}

/// Wraps `text` into lines of at most `width` graphemes, returning each line
/// with the index of its first word and the grapheme offset into that word.
/// Over-long words are split, each piece starting at its own offset.
fn wrap_words(text: &str, width: usize) -> Vec<(String, usize, usize)> {
    let mut out = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;
    let mut line_start = (0usize, 0usize);
    for (word_idx, word) in text.split_whitespace().enumerate() {
        let word_len = word.graphemes(true).count();
        if line_len > 0 && line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
            continue;
        }
        if line_len > 0 {
            out.push((std::mem::take(&mut line), line_start.0, line_start.1));
        }
        line_start = (word_idx, 0);
        if word_len <= width {
            line.push_str(word);
            line_len = word_len;
            continue;
        }
        let graphemes: Vec<&str> = word.graphemes(true).collect();
        let mut chunks = graphemes.chunks(width).enumerate().peekable();
        while let Some((n, chunk)) = chunks.next() {
            let offset = n * width;
            if chunks.peek().is_some() {
                out.push((chunk.concat(), word_idx, offset));
            } else {
                line = chunk.concat();
                line_len = chunk.len();
                line_start = (word_idx, offset);
            }
        }
    }
    if line_len > 0 {
        out.push((line, line_start.0, line_start.1));
    }
    out
}
