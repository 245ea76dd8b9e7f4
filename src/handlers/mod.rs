//! Inbound message handlers.
//!
//! This module contains the [`Handler`] trait, the per-message [`Context`]
//! and the [`Dispatcher`] that routes parsed lines to handlers.

mod channel;
mod context;
mod messaging;
mod numeric;
mod registry;

pub use channel::JoinHandler;
pub use context::{Context, FnHandler, Handler, handler_fn};
pub use messaging::{CapHandler, NoticeHandler, PingHandler, PrivmsgHandler};
pub use numeric::NumericHandler;
pub use registry::{Dispatcher, DispatcherBuilder};
