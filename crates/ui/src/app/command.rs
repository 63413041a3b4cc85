use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::prelude::Rect;
use reader_core::TextView;
use tracing::debug;

use crate::host::ReaderHost;
use crate::navigation::NavigationEvent;

use super::types::{Command, CommandOutcome, Mode};
use super::App;

impl Command {
    pub(super) fn from_key(app: &App, key: KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c')) {
            return Some(Command::Exit);
        }
        if app.show_help {
            return matches!(key.code, KeyCode::Esc | KeyCode::Char('?'))
                .then_some(Command::CloseHelp);
        }
        match key.code {
            KeyCode::Char('q') => Some(Command::Exit),
            KeyCode::Char('?') => Some(Command::ToggleHelp),
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Char(' ') | KeyCode::PageDown => {
                Some(Command::NextPage)
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::PageUp => Some(Command::PrevPage),
            KeyCode::Home => Some(Command::FirstPage),
            KeyCode::End => Some(Command::LastPage),
            KeyCode::Char('n') | KeyCode::Char('g') => Some(Command::OpenNavigation),
            _ => None,
        }
    }
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> CommandOutcome {
        if let Mode::Navigation = self.mode {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl && matches!(key.code, KeyCode::Char('c')) {
                return self.apply_command(Command::Exit);
            }
            match self.navigation.handle_key(&mut self.session, key) {
                NavigationEvent::CloseRequested => self.close_navigation(),
                NavigationEvent::Handled => self.session.repaint(),
                NavigationEvent::Ignored => {}
            }
            return CommandOutcome::Continue;
        }
        match Command::from_key(self, key) {
            Some(command) => self.apply_command(command),
            None => CommandOutcome::Continue,
        }
    }

    pub fn handle_mouse(&mut self, frame: Rect, mouse: MouseEvent) {
        if let Mode::Navigation = self.mode {
            if self.navigation.handle_mouse(&mut self.session, frame, mouse)
                == NavigationEvent::Handled
            {
                self.session.repaint();
            }
        }
    }

    pub(super) fn apply_command(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Exit => {
                self.close_navigation();
                return CommandOutcome::Exit;
            }
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::CloseHelp => self.show_help = false,
            Command::NextPage => self.session.view_mut().next_page(),
            Command::PrevPage => self.session.view_mut().prev_page(),
            Command::FirstPage => self.session.view_mut().goto_home(),
            Command::LastPage => self.session.view_mut().goto_end(),
            Command::OpenNavigation => self.open_navigation(),
        }
        self.session.reset_view();
        self.session.repaint();
        CommandOutcome::Continue
    }

    pub fn open_navigation(&mut self) {
        self.navigation.run_navigation(&mut self.session);
        self.mode = Mode::Navigation;
        self.session.repaint();
    }

    pub fn close_navigation(&mut self) {
        if !self.navigation.is_active() {
            return;
        }
        self.navigation.stop_navigation(&mut self.session);
        self.mode = Mode::Reader;
        self.session.repaint();
        debug!(
            page = self.session.view().page_position().current,
            "back to reading"
        );
    }
}
