//! Integration test common infrastructure.
//!
//! Provides a scripted fake server the client connects to, a
//! channel-backed capture of the client's info strings, and a scripted
//! terminal for the input loop.

pub mod server;
pub mod terminal;

#[allow(unused_imports)]
pub use server::{FakeServer, InfoLog, Peer, fast_settings};
#[allow(unused_imports)]
pub use terminal::ScriptedTerminal;
