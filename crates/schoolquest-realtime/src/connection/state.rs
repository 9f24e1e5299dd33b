//! Connection state machine.
//!
//! Per session: `Idle → Connecting → Open → Closed`. `Open → Closed` also
//! happens directly on transport error. No state is re-entered; a new
//! session starts over at `Idle`.

use std::fmt;

/// Lifecycle state of the realtime connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection attempted yet.
    Idle,
    /// Handshake in flight.
    Connecting,
    /// Connected; heartbeat running.
    Open,
    /// Torn down, by either side. Terminal.
    Closed,
}

impl ConnectionState {
    /// Whether the connection is usable.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Connecting => write!(f, "connecting"),
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}
