mod control;
mod render;
mod slider;


use reader_core::{types::Cursor, TextView};
use tracing::{debug, info};

use crate::host::ReaderHost;
use crate::page_entry_view::PageEntryView;

pub use control::NavigationEvent;
pub use slider::Slider;

pub const RESET_POSITION_KEY: &str = "dialog/button/resetPosition";
pub const ENTER_POSITION_KEY: &str = "dialog/button/enterPosition";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Slider,
    ResetButton,
    EnterButton,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Slider => Focus::ResetButton,
            Focus::ResetButton => Focus::EnterButton,
            Focus::EnterButton => Focus::Slider,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Slider => Focus::EnterButton,
            Focus::ResetButton => Focus::Slider,
            Focus::EnterButton => Focus::ResetButton,
        }
    }
}

struct NavigationWindow {
    slider: Slider,
    text: String,
    reset_label: String,
    enter_label: String,
    reset_enabled: bool,
    focus: Focus,
    page_entry: Option<PageEntryView>,
}

/// Page-jump overlay: a slider over all pages, a position label, a button
/// returning to where navigation started and a button for typing a page.
///
/// The position held when the overlay opened is kept until it closes; leaving
/// the overlay somewhere else records an invisible bookmark at that position.
#[derive(Default)]
pub struct NavigationPopup {
    window: Option<NavigationWindow>,
    start_position: Option<Cursor>,
}

impl NavigationPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.window.is_some()
    }

    pub fn start_position(&self) -> Option<Cursor> {
        self.start_position
    }

    pub fn run_navigation<H: ReaderHost>(&mut self, host: &mut H) {
        self.create_panel(&*host);
        let start = host.text_view().start_cursor();
        self.start_position = Some(start);
        info!(?start, "navigation opened");
        self.setup_navigation(&*host);
    }

    pub fn update<H: ReaderHost>(&mut self, host: &H) {
        if self.window.is_some() {
            self.setup_navigation(host);
        }
    }

    pub fn stop_navigation<H: ReaderHost>(&mut self, host: &mut H) {
        if self.window.is_none() {
            return;
        }
        if let Some(start) = self.start_position.take() {
            if start != host.text_view().start_cursor() {
                info!(?start, "leaving navigation away from start; bookmarking it");
                host.add_invisible_bookmark(start);
                host.store_position();
            }
        }
        self.window = None;
        debug!("navigation closed");
    }

    fn create_panel<H: ReaderHost>(&mut self, host: &H) {
        if self.window.is_some() {
            return;
        }
        self.window = Some(NavigationWindow {
            slider: Slider::default(),
            text: String::new(),
            reset_label: host.resource(RESET_POSITION_KEY),
            enter_label: host.resource(ENTER_POSITION_KEY),
            reset_enabled: false,
            focus: Focus::Slider,
            page_entry: None,
        });
    }

    fn setup_navigation<H: ReaderHost>(&mut self, host: &H) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        let position = host.text_view().page_position();
        let max = position.total.saturating_sub(1);
        let progress = position.current.saturating_sub(1);
        if window.slider.max() != max
            || window.slider.progress() != progress
            || window.text.is_empty()
        {
            window.slider.set_max(max);
            window.slider.set_progress(progress);
            window.text = progress_text(host, position.current, position.total);
        }
        window.reset_enabled = reset_enabled(self.start_position, host);
    }

    /// Slider change handler. Only user changes navigate, so programmatic
    /// updates of the slider never feed back into the view.
    pub fn on_slider_changed<H: ReaderHost>(
        &mut self,
        host: &mut H,
        progress: usize,
        from_user: bool,
    ) {
        if !from_user {
            return;
        }
        let Some(window) = self.window.as_mut() else {
            return;
        };
        let page = progress + 1;
        let pages_number = window.slider.max() + 1;
        goto_page(host, page);
        window.text = progress_text(&*host, page, pages_number);
        window.reset_enabled = reset_enabled(self.start_position, &*host);
    }

    /// Moves the slider as the user would and navigates accordingly.
    pub fn slide_to<H: ReaderHost>(&mut self, host: &mut H, value: usize) {
        let changed = self
            .window
            .as_mut()
            .and_then(|window| window.slider.drag_to(value));
        if let Some(progress) = changed {
            self.on_slider_changed(host, progress, true);
        }
    }

    pub fn slide_by<H: ReaderHost>(&mut self, host: &mut H, delta: isize) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let target = window.slider.progress().saturating_add_signed(delta);
        self.slide_to(host, target);
    }

    pub fn on_reset<H: ReaderHost>(&mut self, host: &mut H) {
        if let Some(start) = self.start_position {
            host.text_view_mut().goto_position(&start);
            debug!(?start, "navigation reset to start");
        }
        host.reset_view();
        host.repaint();
        self.update(&*host);
    }

    pub fn open_page_entry<H: ReaderHost>(&mut self, host: &H) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        let position = host.text_view().page_position();
        window.page_entry = Some(PageEntryView::new(position.current, position.total));
    }

    pub fn page_entry(&self) -> Option<&PageEntryView> {
        self.window.as_ref().and_then(|w| w.page_entry.as_ref())
    }

    pub fn page_entry_mut(&mut self) -> Option<&mut PageEntryView> {
        self.window.as_mut().and_then(|w| w.page_entry.as_mut())
    }

    /// Navigates to the typed page when it lies within `1..=total`. The dialog
    /// closes either way.
    pub fn submit_page_entry<H: ReaderHost>(&mut self, host: &mut H) {
        let Some(entry) = self.window.as_mut().and_then(|w| w.page_entry.take()) else {
            return;
        };
        let total = host.text_view().page_position().total;
        match entry.value() {
            Some(num) if num > 0 && num <= total => {
                goto_page(host, num);
                self.setup_navigation(&*host);
            }
            other => debug!(value = ?other, total, "ignoring out-of-range page entry"),
        }
    }

    pub fn cancel_page_entry(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.page_entry = None;
        }
    }

    pub fn slider(&self) -> Option<&Slider> {
        self.window.as_ref().map(|w| &w.slider)
    }

    pub fn label(&self) -> Option<&str> {
        self.window.as_ref().map(|w| w.text.as_str())
    }

    pub fn is_reset_enabled(&self) -> bool {
        self.window.as_ref().is_some_and(|w| w.reset_enabled)
    }

    pub fn focus(&self) -> Option<Focus> {
        self.window.as_ref().map(|w| w.focus)
    }
}

fn goto_page<H: ReaderHost>(host: &mut H, page: usize) {
    let view = host.text_view_mut();
    if page == 1 {
        view.goto_home();
    } else {
        view.goto_page(page);
    }
    debug!(page, "navigated");
    host.reset_view();
    host.repaint();
}

fn reset_enabled<H: ReaderHost>(start: Option<Cursor>, host: &H) -> bool {
    start.is_some_and(|start| start != host.text_view().start_cursor())
}

fn progress_text<H: ReaderHost>(host: &H, page: usize, pages_number: usize) -> String {
    make_progress_text(page, pages_number, host.current_toc_title().as_deref())
}

/// `"<page>/<total>"`, followed by two spaces and the TOC title when present.
pub fn make_progress_text(page: usize, pages_number: usize, toc_title: Option<&str>) -> String {
    let mut text = format!("{page}/{pages_number}");
    if let Some(title) = toc_title {
        text.push_str("  ");
        text.push_str(title);
    }
    text
}
