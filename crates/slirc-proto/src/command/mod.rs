//! Outbound commands synthesized by the client.

mod serialize;
mod types;

pub use self::serialize::encode;
pub use self::types::Command;
