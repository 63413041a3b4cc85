pub mod app;
pub mod host;
pub mod layout;
pub mod navigation;
pub mod page_entry_view;
pub mod reader_view;
