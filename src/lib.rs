//! slirc-client - a minimal line-oriented IRC client.
//!
//! A [`Connection`] opens a socket to one server, sends the registration
//! handshake and runs a background reader that parses and dispatches every
//! inbound line. The caller's task drives [`stream_input`], sending what
//! the user types to the current channel.

pub mod config;
pub mod error;
pub mod handlers;
pub mod info;
pub mod input;
pub mod network;

pub use config::{ClientSettings, Config, ServerConfig};
pub use error::{ClientError, ConnectFailure, ConnectFailureReason, HandlerError, HandlerResult};
pub use handlers::{Context, Dispatcher, Handler, handler_fn};
pub use info::InfoSink;
pub use input::{StdioTerminal, Terminal, stream_input};
pub use network::{Connection, ConnectionState, DEFAULT_CHANNEL, Incoming, SessionState};
