//! Tagged connection state with validated transitions.
//!
//! ```text
//! Disconnected ──BeginConnect──▶ Connecting ──Established──▶ Connected{Unregistered}
//!      ▲                            │                              │ Register
//!      │                      ConnectFailed                        ▼
//!      └──────────── Disconnect ◀───┴──────────────────── Connected{Registered}
//! ```
//!
//! `listening` rides along on either `Connected` variant and is toggled by
//! `StartListening` / `StopListening`.

use std::fmt;

use crate::error::ClientError;

/// Registration progress of a connected session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Unregistered,
    Registered,
}

/// Connection lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected {
        registration: Registration,
        listening: bool,
    },
}

/// Events that move a connection between states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    BeginConnect,
    Established,
    ConnectFailed,
    Register,
    StartListening,
    StopListening,
    Disconnect,
}

impl ConnectionState {
    /// Apply `event`, returning the next state or the rejected transition.
    pub fn apply(self, event: Transition) -> Result<Self, ClientError> {
        use ConnectionState::*;
        use Transition::*;

        let next = match (self, event) {
            (Disconnected, BeginConnect) => Connecting,
            (Connecting, Established) => Connected {
                registration: Registration::Unregistered,
                listening: false,
            },
            (Connecting, ConnectFailed) => Disconnected,
            (Connected { listening, .. }, Register) => Connected {
                registration: Registration::Registered,
                listening,
            },
            (Connected { registration, .. }, StartListening) => Connected {
                registration,
                listening: true,
            },
            (Connected { registration, .. }, StopListening) => Connected {
                registration,
                listening: false,
            },
            (_, Disconnect) => Disconnected,
            (from, event) => return Err(ClientError::InvalidTransition { from, event }),
        };
        Ok(next)
    }

    /// The socket is open.
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    /// Registration commands have been sent.
    pub fn is_registered(&self) -> bool {
        matches!(
            self,
            ConnectionState::Connected {
                registration: Registration::Registered,
                ..
            }
        )
    }

    /// A reader task is consuming inbound lines.
    pub fn is_listening(&self) -> bool {
        matches!(self, ConnectionState::Connected { listening: true, .. })
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Connected: {}\nRegistered: {}\nListening: {}",
            self.is_connected(),
            self.is_registered(),
            self.is_listening()
        )
    }
}
