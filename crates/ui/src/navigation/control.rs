use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::Rect;

use crate::host::ReaderHost;

use super::{Focus, NavigationPopup};

const PAGE_STEP: isize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationEvent {
    Handled,
    Ignored,
    CloseRequested,
}

impl NavigationPopup {
    pub fn handle_key<H: ReaderHost>(&mut self, host: &mut H, key: KeyEvent) -> NavigationEvent {
        if self.window.is_none() {
            return NavigationEvent::Ignored;
        }
        if self.page_entry().is_some() {
            return self.handle_page_entry_key(host, key);
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('g') => {
                return NavigationEvent::CloseRequested;
            }
            KeyCode::Left | KeyCode::Char('h') => self.slide_by(host, -1),
            KeyCode::Right | KeyCode::Char('l') => self.slide_by(host, 1),
            KeyCode::PageDown => self.slide_by(host, PAGE_STEP),
            KeyCode::PageUp => self.slide_by(host, -PAGE_STEP),
            KeyCode::Home => self.slide_to(host, 0),
            KeyCode::End => self.slide_to(host, usize::MAX),
            KeyCode::Tab => self.move_focus(Focus::next),
            KeyCode::BackTab => self.move_focus(Focus::prev),
            KeyCode::Char('r') => self.activate(host, Focus::ResetButton),
            KeyCode::Char('e') | KeyCode::Char(':') => self.activate(host, Focus::EnterButton),
            KeyCode::Enter => {
                let focus = self.focus().unwrap_or(Focus::Slider);
                self.activate(host, focus);
            }
            _ => return NavigationEvent::Ignored,
        }
        NavigationEvent::Handled
    }

    fn handle_page_entry_key<H: ReaderHost>(
        &mut self,
        host: &mut H,
        key: KeyEvent,
    ) -> NavigationEvent {
        match key.code {
            KeyCode::Esc => self.cancel_page_entry(),
            KeyCode::Enter => self.submit_page_entry(host),
            KeyCode::Backspace => {
                if let Some(entry) = self.page_entry_mut() {
                    entry.backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(entry) = self.page_entry_mut() {
                    entry.push_char(c);
                }
            }
            _ => return NavigationEvent::Ignored,
        }
        host.repaint();
        NavigationEvent::Handled
    }

    pub fn handle_mouse<H: ReaderHost>(
        &mut self,
        host: &mut H,
        area: Rect,
        mouse: MouseEvent,
    ) -> NavigationEvent {
        if self.window.is_none() || self.page_entry().is_some() {
            return NavigationEvent::Ignored;
        }
        let areas = self.areas(area);
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                if rect_contains(areas.slider, column, row) {
                    let value = self
                        .slider()
                        .map(|s| s.value_at(areas.slider, column))
                        .unwrap_or(0);
                    self.set_focus(Focus::Slider);
                    self.slide_to(host, value);
                    return NavigationEvent::Handled;
                }
                if !matches!(mouse.kind, MouseEventKind::Down(_)) {
                    return NavigationEvent::Ignored;
                }
                if rect_contains(areas.reset, column, row) {
                    self.activate(host, Focus::ResetButton);
                } else if rect_contains(areas.enter, column, row) {
                    self.activate(host, Focus::EnterButton);
                } else {
                    return NavigationEvent::Ignored;
                }
                NavigationEvent::Handled
            }
            _ => NavigationEvent::Ignored,
        }
    }

    fn activate<H: ReaderHost>(&mut self, host: &mut H, target: Focus) {
        self.set_focus(target);
        match target {
            Focus::Slider => {}
            Focus::ResetButton => {
                if self.is_reset_enabled() {
                    self.on_reset(host);
                }
            }
            Focus::EnterButton => self.open_page_entry(&*host),
        }
        host.repaint();
    }

    fn move_focus(&mut self, step: fn(Focus) -> Focus) {
        if let Some(window) = self.window.as_mut() {
            window.focus = step(window.focus);
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if let Some(window) = self.window.as_mut() {
            window.focus = focus;
        }
    }
}

fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}
