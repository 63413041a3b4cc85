use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

/// Numeric page input whose value is kept within `0..=max`.
pub struct PageEntryView {
    pub input: String,
    max: usize,
}

impl PageEntryView {
    pub fn new(current: usize, max: usize) -> Self {
        Self {
            input: current.to_string(),
            max,
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Appends a digit; edits that would leave the allowed range are rejected.
    pub fn push_char(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        let mut candidate = self.input.clone();
        candidate.push(c);
        if !self.accepts(&candidate) {
            return false;
        }
        self.input = candidate;
        true
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.input.grapheme_indices(true).last() {
            self.input.truncate(idx);
        }
    }

    pub fn value(&self) -> Option<usize> {
        self.input.trim().parse().ok()
    }

    fn accepts(&self, candidate: &str) -> bool {
        candidate
            .parse::<usize>()
            .is_ok_and(|n| n <= self.max)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, title: &str) {
        let mut width = ((area.width as f32) * 0.4) as u16;
        width = width.max(24).min(area.width.saturating_sub(2).max(1));
        let height: u16 = 3;
        let popup_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        let block = Block::default()
            .title(format!("{title} (1-{}, Enter/Esc)", self.max))
            .borders(Borders::ALL);
        let prompt = Paragraph::new(format!("> {}", self.input)).block(block);
        f.render_widget(Clear, popup_area);
        f.render_widget(prompt, popup_area);
    }
}
