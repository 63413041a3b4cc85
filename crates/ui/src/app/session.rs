use std::path::PathBuf;

use reader_core::{
    layout::Size,
    resources::Resources,
    state::{add_bookmark, save_state, save_state_to},
    types::{AppStateRecord, Cursor, Document},
    PagedView, TextView,
};
use tracing::{info, warn};

use crate::host::ReaderHost;

/// The open book: its layout, the persisted reading state and UI strings.
pub struct ReaderSession {
    document: Document,
    view: PagedView,
    record: AppStateRecord,
    resources: Resources,
    state_dir: Option<PathBuf>,
    needs_redraw: bool,
}

impl ReaderSession {
    pub fn new(
        document: Document,
        record: AppStateRecord,
        resources: Resources,
        size: Size,
    ) -> Self {
        let mut view = PagedView::new(&document.blocks, size);
        view.goto_position(&record.last_location);
        Self {
            document,
            view,
            record,
            resources,
            state_dir: None,
            needs_redraw: true,
        }
    }

    /// Persist state under `dir` instead of the user config directory.
    pub fn with_state_dir(mut self, dir: PathBuf) -> Self {
        self.state_dir = Some(dir);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn view(&self) -> &PagedView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut PagedView {
        &mut self.view
    }

    pub fn record(&self) -> &AppStateRecord {
        &self.record
    }

    pub fn into_record(mut self) -> AppStateRecord {
        self.sync_location();
        self.record
    }

    pub fn repaginate(&mut self, size: Size) {
        self.view.repaginate(&self.document.blocks, size);
        self.needs_redraw = true;
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn sync_location(&mut self) {
        self.record.last_location = self.view.start_cursor();
    }
}

impl ReaderHost for ReaderSession {
    type View = PagedView;

    fn text_view(&self) -> &PagedView {
        &self.view
    }

    fn text_view_mut(&mut self) -> &mut PagedView {
        &mut self.view
    }

    fn current_toc_title(&self) -> Option<String> {
        self.document
            .toc_entry_at(self.view.start_cursor())
            .map(|entry| entry.label.clone())
    }

    fn add_invisible_bookmark(&mut self, cursor: Cursor) {
        if add_bookmark(&mut self.record, cursor, false) {
            info!(?cursor, "added invisible bookmark");
        }
    }

    fn store_position(&mut self) {
        self.sync_location();
        let result = match &self.state_dir {
            Some(dir) => save_state_to(dir, &self.record),
            None => save_state(&self.record),
        };
        if let Err(err) = result {
            warn!("failed to store reading position: {err}");
        }
    }

    /// Brings the session's bookkeeping in line with the view after a jump.
    fn reset_view(&mut self) {
        self.sync_location();
    }

    fn repaint(&mut self) {
        self.needs_redraw = true;
    }

    fn resource(&self, key: &str) -> String {
        self.resources.value(key)
    }
}
