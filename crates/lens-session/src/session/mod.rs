//! Session state and the coordinator that drives it.

mod coordinator;
mod state;

pub use coordinator::SessionCoordinator;
pub use state::{DocumentMeta, Phase, SessionSnapshot, SessionState};
