//! Session-local play statistics.

pub mod session;

pub use session::SessionStats;
