//! Session ownership of player state

pub mod session;

pub use session::{PlayerSession, SharedSession, SessionError, flush_shared, load_shared};
