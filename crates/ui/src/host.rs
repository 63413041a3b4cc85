use reader_core::{types::Cursor, TextView};

/// What the navigation overlay needs from the surrounding application.
pub trait ReaderHost {
    type View: TextView;

    fn text_view(&self) -> &Self::View;
    fn text_view_mut(&mut self) -> &mut Self::View;

    /// Title of the table-of-contents entry holding the current page.
    fn current_toc_title(&self) -> Option<String>;

    fn add_invisible_bookmark(&mut self, cursor: Cursor);
    fn store_position(&mut self);

    fn reset_view(&mut self);
    fn repaint(&mut self);

    /// Localized string for a `/`-separated resource key.
    fn resource(&self, key: &str) -> String;
}
