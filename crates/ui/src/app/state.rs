use reader_core::config::Settings;

use crate::navigation::NavigationPopup;
use crate::reader_view::{ReaderView, Theme};

use super::session::ReaderSession;
use super::types::Mode;

pub struct App {
    pub session: ReaderSession,
    pub navigation: NavigationPopup,
    pub mode: Mode,
    pub show_help: bool,
    pub view: ReaderView,
}

impl App {
    pub fn new(session: ReaderSession, settings: &Settings) -> Self {
        Self {
            session,
            navigation: NavigationPopup::new(),
            mode: Mode::Reader,
            show_help: settings.show_help_on_start,
            view: ReaderView::new(Theme::default(), settings.column_width),
        }
    }
}
