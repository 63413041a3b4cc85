mod command;
mod run;
mod session;
mod state;
mod types;


pub use session::ReaderSession;
pub use state::App;
pub use types::{CommandOutcome, Mode};
