pub mod config;
pub mod layout;
pub mod resources;
pub mod state;
pub mod text;
pub mod text_view;
pub mod types;

pub use text_view::{PagedView, TextView};
