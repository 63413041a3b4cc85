use ratatui::{prelude::*, widgets::*};
use reader_core::{layout::Size, TextView};
use unicode_segmentation::UnicodeSegmentation;

use crate::app::ReaderSession;
use crate::host::ReaderHost;

// Tokyonight-inspired palette; tweak these to change header/footer colors.
const TN_BG: Color = Color::Rgb(26, 27, 38); // #1a1b26
const TN_BG_ALT: Color = Color::Rgb(31, 35, 53); // #1f2335
const TN_BG_STRONG: Color = Color::Rgb(65, 72, 104); // #414868
const TN_FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
const TN_BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7

#[derive(Clone)]
pub struct Theme {
    pub header_bg: Color,
    pub header_fg: Color,
    pub footer_bg: Color,
    pub footer_fg: Color,
    pub heading_fg: Color,
    pub pad_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_bg: TN_BG_ALT,
            header_fg: TN_FG,
            footer_bg: TN_BG_STRONG,
            footer_fg: TN_BLUE,
            heading_fg: TN_BLUE,
            pad_bg: TN_BG,
        }
    }
}

/// Draws the current page in a centered column with a title header and a
/// position footer.
pub struct ReaderView {
    pub theme: Theme,
    pub column_width: u16,
}

impl ReaderView {
    pub fn new(theme: Theme, column_width: u16) -> Self {
        Self {
            theme,
            column_width,
        }
    }

    fn column(&self, area: Rect) -> Rect {
        let col_w = self.column_width.min(area.width);
        Rect {
            x: area.x + area.width.saturating_sub(col_w) / 2,
            y: area.y,
            width: col_w,
            height: area.height,
        }
    }

    /// Text area available to the paginator for a frame of `area`.
    pub fn inner_size(&self, area: Rect) -> Size {
        Size {
            width: self.column(area).width,
            height: area.height.saturating_sub(2),
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, session: &ReaderSession) {
        f.render_widget(Block::default().bg(self.theme.pad_bg), area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let title = session
            .document()
            .info
            .title
            .clone()
            .unwrap_or_default();
        let header = Paragraph::new(Line::from(truncate(&title, chunks[0].width)))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(self.theme.header_fg)
                    .bg(self.theme.header_bg),
            );
        f.render_widget(header, chunks[0]);

        let body = self.column(chunks[1]);
        let lines: Vec<Line> = session
            .view()
            .current_page()
            .map(|page| {
                page.lines
                    .iter()
                    .map(|line| {
                        if line.heading {
                            Line::styled(
                                line.text.clone(),
                                Style::default()
                                    .fg(self.theme.heading_fg)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Line::from(line.text.clone())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        f.render_widget(Paragraph::new(lines), body);

        let position = session.view().page_position();
        let mut footer = format!("{}/{}", position.current, position.total);
        if let Some(title) = session.current_toc_title() {
            footer.push_str(" · ");
            footer.push_str(&title);
        }
        footer.push_str("   n: navigate  ?: help");
        let footer = Paragraph::new(Line::from(truncate(&footer, chunks[2].width))).style(
            Style::default()
                .fg(self.theme.footer_fg)
                .bg(self.theme.footer_bg),
        );
        f.render_widget(footer, chunks[2]);
    }
}

fn truncate(text: &str, max_w: u16) -> String {
    let max_w = usize::from(max_w);
    let gs: Vec<&str> = text.graphemes(true).collect();
    if gs.len() <= max_w {
        return text.to_string();
    }
    if max_w == 0 {
        return String::new();
    }
    format!("{}…", gs[..max_w - 1].concat())
}
