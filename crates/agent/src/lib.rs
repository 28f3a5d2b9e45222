//! Booking dialogue engine
//!
//! The conversational core of the salon voice agent:
//! - [`session::BookingSession`]: per-conversation slot state, one slot
//!   filled per turn in fixed order
//! - [`turn::TurnEngine`]: conflict / confirmation / rejection decision
//!   logic, with the chat model as the default path
//! - [`registry::SessionRegistry`]: shared session table with idle sweep
//! - [`stats::BookingStats`]: aggregate booking count and revenue

pub mod registry;
pub mod session;
pub mod stats;
pub mod turn;

pub use registry::SessionRegistry;
pub use session::BookingSession;
pub use stats::{BookingStats, StatsSnapshot};
pub use turn::TurnEngine;

use thiserror::Error;

/// Dialogue engine errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("session capacity reached ({0} active sessions)")]
    CapacityExceeded(usize),
}
