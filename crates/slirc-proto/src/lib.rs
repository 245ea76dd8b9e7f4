//! # slirc-proto
//!
//! Wire layer for the slirc client: parsing raw IRC lines into
//! [`ParsedMessage`], encoding outbound [`Command`]s, and framing
//! CRLF-terminated lines on a tokio stream.
//!
//! ## Parsing
//!
//! ```rust
//! use slirc_proto::ParsedMessage;
//!
//! let msg = ParsedMessage::parse(":nick!user@host PRIVMSG #chan :hello world");
//! assert_eq!(msg.source, "nick!user@host");
//! assert_eq!(msg.command, "privmsg");
//! assert_eq!(msg.parameters, vec!["#chan".to_string()]);
//! assert_eq!(msg.content, "hello world");
//! ```
//!
//! Parsing never fails. A blank line yields a message with every field empty.
//!
//! ## Encoding
//!
//! ```rust
//! use slirc_proto::Command;
//!
//! assert_eq!(Command::join("#general").to_string(), "JOIN #general");
//! assert_eq!(
//!     Command::privmsg(Some("#general"), "hi there").to_string(),
//!     "PRIVMSG #general :hi there"
//! );
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod response;

pub use self::command::Command;
pub use self::error::ProtocolError;
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::message::ParsedMessage;
pub use self::response::Response;

/// Maximum line length accepted from the wire, terminator included.
///
/// RFC 1459 caps lines at 512 bytes; IRCv3 tags can add up to 8191 more.
pub const MAX_LINE_LEN: usize = 512 + 8191;
