use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

use super::{Focus, NavigationPopup, NavigationWindow};

const PANEL_HEIGHT: u16 = 5;
const MAX_PANEL_WIDTH: u16 = 80;
const BUTTON_GAP: u16 = 2;

pub(crate) struct PanelAreas {
    pub panel: Rect,
    pub label: Rect,
    pub slider: Rect,
    pub reset: Rect,
    pub enter: Rect,
}

fn button_text(label: &str) -> String {
    format!("[ {label} ]")
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.graphemes(true).count()).unwrap_or(u16::MAX)
}

impl NavigationPopup {
    /// Panel docked above the footer line of `area`.
    pub(crate) fn areas(&self, area: Rect) -> PanelAreas {
        let width = area.width.min(MAX_PANEL_WIDTH);
        let height = PANEL_HEIGHT.min(area.height);
        let panel = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height.saturating_sub(height + 1),
            width,
            height,
        };
        let inner = Block::default().borders(Borders::ALL).inner(panel);
        let row = |offset: u16| Rect {
            x: inner.x,
            y: inner.y + offset.min(inner.height.saturating_sub(1)),
            width: inner.width,
            height: u16::from(inner.height > offset),
        };
        let buttons = row(2);
        let (reset_w, enter_w) = self
            .window
            .as_ref()
            .map(|w| {
                (
                    text_width(&button_text(&w.reset_label)),
                    text_width(&button_text(&w.enter_label)),
                )
            })
            .unwrap_or((0, 0));
        let reset = Rect {
            width: reset_w.min(buttons.width),
            ..buttons
        };
        let enter_x = (reset.x + reset.width + BUTTON_GAP).min(buttons.x + buttons.width);
        let enter = Rect {
            x: enter_x,
            width: enter_w.min(buttons.x + buttons.width - enter_x),
            ..buttons
        };
        PanelAreas {
            panel,
            label: row(0),
            slider: row(1),
            reset,
            enter,
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let areas = self.areas(area);
        let block = Block::default().borders(Borders::ALL);
        f.render_widget(Clear, areas.panel);
        f.render_widget(block, areas.panel);

        let label = Paragraph::new(window.text.as_str()).alignment(Alignment::Center);
        f.render_widget(label, areas.label);
        f.render_widget(slider_line(window, areas.slider.width), areas.slider);

        let reset_style = if !window.reset_enabled {
            Style::default().fg(Color::DarkGray)
        } else if window.focus == Focus::ResetButton {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let enter_style = if window.focus == Focus::EnterButton {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        f.render_widget(
            Paragraph::new(Span::styled(button_text(&window.reset_label), reset_style)),
            areas.reset,
        );
        f.render_widget(
            Paragraph::new(Span::styled(button_text(&window.enter_label), enter_style)),
            areas.enter,
        );

        if let Some(entry) = &window.page_entry {
            entry.render(f, area, &window.enter_label);
        }
    }
}

fn slider_line(window: &NavigationWindow, width: u16) -> Line<'static> {
    let knob = window.slider.knob_offset(width);
    let knob_style = if window.focus == Focus::Slider {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let filled = "━".repeat(usize::from(knob));
    let empty = "─".repeat(usize::from(width.saturating_sub(knob + 1)));
    Line::from(vec![
        Span::styled(filled, Style::default().fg(Color::Blue)),
        Span::styled("●", knob_style),
        Span::styled(empty, Style::default().fg(Color::DarkGray)),
    ])
}
