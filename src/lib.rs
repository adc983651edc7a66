pub mod io;
pub mod state;

pub use state::session::{Session, SessionError};
