use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::types::{Block, Cursor, Document, DocumentFormat, DocumentInfo, TocEntry};

#[derive(Debug, Error)]
pub enum TextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} contains no readable text")]
    Empty(String),
}

pub struct TextFile {
    pub path: PathBuf,
    pub content: String,
}

impl TextFile {
    pub fn open(path: &Path) -> Result<Self, TextError> {
        let content = std::fs::read_to_string(path)?;
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(Self { path, content })
    }

    pub fn to_document(&self) -> Result<Document, TextError> {
        let format = detect_format(&self.path);
        let blocks = parse_blocks(&self.content, format);
        let path_str = self.path.to_string_lossy().into_owned();
        if blocks.is_empty() {
            return Err(TextError::Empty(path_str));
        }
        let title = first_heading_title(&blocks)
            .or_else(|| title_from_path(&self.path))
            .unwrap_or_else(|| "Untitled".to_string());
        let toc_entries = toc_from_blocks(&blocks);
        let info = DocumentInfo {
            id: content_id(&self.content),
            path: path_str,
            title: Some(title),
            format,
        };
        Ok(Document::new(info, blocks, toc_entries))
    }
}

pub fn content_id(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    format!("sha256:{:x}", digest)
}

fn detect_format(path: &Path) -> DocumentFormat {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("md") | Some("markdown") => DocumentFormat::Markdown,
        _ => DocumentFormat::Text,
    }
}

fn title_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem().and_then(|s| s.to_str())?;
    let title = collapse_whitespace(&stem.replace(['_', '-', '.'], " "));
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

pub(crate) fn toc_from_blocks(blocks: &[Block]) -> Vec<TocEntry> {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(idx, block)| match block {
            Block::Heading(text, _) => Some(TocEntry {
                label: text.clone(),
                cursor: Cursor::new(idx, 0),
            }),
            Block::Paragraph(_) => None,
        })
        .collect()
}

pub(crate) fn parse_blocks(content: &str, format: DocumentFormat) -> Vec<Block> {
    let markdown = matches!(format, DocumentFormat::Markdown);
    let mut blocks = Vec::new();
    let mut paragraph_lines: Vec<String> = Vec::new();
    let mut in_fence = false;

    let mut lines = content.lines().peekable();
    while let Some(raw_line) = lines.next() {
        let line = raw_line.trim_end_matches('\r');
        let trimmed = line.trim();

        if markdown && is_fence(trimmed) {
            flush_paragraph(&mut paragraph_lines, &mut blocks);
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            if !trimmed.is_empty() {
                blocks.push(Block::Paragraph(trimmed.to_string()));
            }
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph_lines, &mut blocks);
            continue;
        }

        if let Some(level) = lines.peek().and_then(|next| setext_level(next)) {
            let _ = lines.next();
            // Markdown underlines the whole paragraph. Plain text only counts a
            // lone underlined line; under a longer paragraph it is decoration.
            if markdown || paragraph_lines.is_empty() {
                paragraph_lines.push(trimmed.to_string());
                let text = clean_inline(&paragraph_lines.join(" "));
                paragraph_lines.clear();
                blocks.push(Block::Heading(text, level));
            } else {
                paragraph_lines.push(trimmed.to_string());
                flush_paragraph(&mut paragraph_lines, &mut blocks);
            }
            continue;
        }

        if markdown {
            if let Some((level, text)) = parse_atx_heading(trimmed) {
                flush_paragraph(&mut paragraph_lines, &mut blocks);
                blocks.push(Block::Heading(text, level));
                continue;
            }
        }

        if is_separator_line(trimmed) {
            flush_paragraph(&mut paragraph_lines, &mut blocks);
            continue;
        }

        if let Some(item) = parse_list_item(trimmed) {
            flush_paragraph(&mut paragraph_lines, &mut blocks);
            blocks.push(Block::Paragraph(format!("• {item}")));
            continue;
        }

        let text = if markdown {
            parse_quote_line(trimmed).unwrap_or_else(|| trimmed.to_string())
        } else {
            trimmed.to_string()
        };
        paragraph_lines.push(text);
    }
    flush_paragraph(&mut paragraph_lines, &mut blocks);
    blocks
}

fn is_fence(line: &str) -> bool {
    line.starts_with("```") || line.starts_with("~~~")
}

fn parse_atx_heading(line: &str) -> Option<(u8, String)> {
    let count = line.bytes().take_while(|b| *b == b'#').count();
    if count == 0 || count > 6 {
        return None;
    }
    let rest = line[count..].trim();
    let rest = rest.trim_end_matches('#').trim();
    if rest.is_empty() {
        return None;
    }
    Some((count as u8, clean_inline(rest)))
}

fn setext_level(line: &str) -> Option<u8> {
    let trimmed = line.trim();
    if trimmed.len() < 3 {
        return None;
    }
    let first = trimmed.chars().next()?;
    if first != '=' && first != '-' {
        return None;
    }
    if trimmed.chars().all(|c| c == first) {
        Some(if first == '=' { 1 } else { 2 })
    } else {
        None
    }
}

fn parse_list_item(line: &str) -> Option<String> {
    for bullet in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            let cleaned = clean_inline(rest);
            return (!cleaned.is_empty()).then_some(cleaned);
        }
    }
    None
}

fn parse_quote_line(line: &str) -> Option<String> {
    let rest = line.strip_prefix('>')?;
    Some(clean_inline(rest.trim_start_matches('>')))
}

fn is_separator_line(line: &str) -> bool {
    if line == "\u{000C}" {
        return true;
    }
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() < 3 {
        return false;
    }
    let Some(first) = compact.chars().next() else {
        return false;
    };
    if first != '-' && first != '*' && first != '_' {
        return false;
    }
    compact.chars().all(|c| c == first)
}

fn clean_inline(input: &str) -> String {
    let s = input
        .replace('\u{00A0}', " ")
        .replace(
            ['\u{200B}', '\u{200C}', '\u{200D}', '\u{200E}', '\u{200F}'],
            "",
        )
        .replace('\u{FEFF}', "");
    collapse_whitespace(&s)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn flush_paragraph(lines: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if lines.is_empty() {
        return;
    }
    let text = clean_inline(&lines.join(" "));
    lines.clear();
    if !text.is_empty() {
        blocks.push(Block::Paragraph(text));
    }
}

fn first_heading_title(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Heading(text, _) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paragraphs_as_continuous_text() {
        let input = "Hello\nworld\n\nNext paragraph.";
        let blocks = parse_blocks(input, DocumentFormat::Text);
        assert_eq!(blocks[0], Block::Paragraph("Hello world".into()));
        assert_eq!(blocks[1], Block::Paragraph("Next paragraph.".into()));
    }

    #[test]
    fn list_items_become_bulleted_paragraphs() {
        let input = "- One\n- Two\n\nAfter";
        let blocks = parse_blocks(input, DocumentFormat::Text);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::Paragraph("• One".into()));
        assert_eq!(blocks[2], Block::Paragraph("After".into()));
    }

    #[test]
    fn markdown_atx_headings_are_detected() {
        let input = "# Title\n\nBody text.\n\n## Part ##\n";
        let blocks = parse_blocks(input, DocumentFormat::Markdown);
        assert_eq!(blocks[0], Block::Heading("Title".into(), 1));
        assert_eq!(blocks[2], Block::Heading("Part".into(), 2));
    }

    #[test]
    fn plain_text_ignores_hash_headings_but_keeps_underlined_ones() {
        let input = "# not a heading\n\nChapter One\n===========\n\nText.";
        let blocks = parse_blocks(input, DocumentFormat::Text);
        assert_eq!(blocks[0], Block::Paragraph("# not a heading".into()));
        assert_eq!(blocks[1], Block::Heading("Chapter One".into(), 1));
    }

    #[test]
    fn markdown_setext_heading_spans_the_whole_paragraph() {
        let input = "A heading\nover two lines\n---\n\nBody.";
        let blocks = parse_blocks(input, DocumentFormat::Markdown);
        assert_eq!(
            blocks,
            vec![
                Block::Heading("A heading over two lines".into(), 2),
                Block::Paragraph("Body.".into())
            ]
        );
    }

    #[test]
    fn plain_text_underline_below_a_paragraph_is_not_a_heading() {
        let input = "Some prose that\nruns on\n=======\n\nMore.";
        let blocks = parse_blocks(input, DocumentFormat::Text);
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("Some prose that runs on".into()),
                Block::Paragraph("More.".into())
            ]
        );
    }

    #[test]
    fn horizontal_rules_are_dropped() {
        let input = "First\n\n---\n\nSecond";
        let blocks = parse_blocks(input, DocumentFormat::Text);
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("First".into()),
                Block::Paragraph("Second".into())
            ]
        );
    }

    #[test]
    fn toc_entries_point_at_heading_blocks() {
        let blocks = parse_blocks(
            "# One\n\nText\n\n## Two\n\nMore",
            DocumentFormat::Markdown,
        );
        let toc = toc_from_blocks(&blocks);
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].cursor, Cursor::new(0, 0));
        assert_eq!(toc[1].label, "Two");
        assert_eq!(toc[1].cursor, Cursor::new(2, 0));
    }

    #[test]
    fn content_id_is_stable_sha256() {
        let id = content_id("abc");
        assert_eq!(
            id,
            "sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
