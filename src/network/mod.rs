//! Network module.
//!
//! Contains the [`Connection`] state machine, the shared [`Session`] and
//! the background reader task.

pub mod connection;

pub use connection::{
    Connection, ConnectionState, DEFAULT_CHANNEL, Incoming, Registration, Session, SessionState,
    Transition,
};
