//! Info hook for user-facing diagnostics.
//!
//! Every string the core wants the user to see goes through an [`InfoSink`]:
//! it is logged with `tracing` and then handed to the subscriber installed
//! with [`InfoSink::set_callback`], if any.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

/// Subscriber callback for info strings.
pub type InfoCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Shared sink for info and error strings.
///
/// Cloning shares the same callback slot.
#[derive(Clone, Default)]
pub struct InfoSink {
    callback: Arc<RwLock<Option<InfoCallback>>>,
}

impl InfoSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or replace) the subscriber.
    pub fn set_callback<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *self.callback.write() = Some(Arc::new(callback));
    }

    /// Remove the subscriber.
    pub fn clear_callback(&self) {
        *self.callback.write() = None;
    }

    /// Surface an informational string.
    pub fn info(&self, text: &str) {
        info!(target: "slirc::info", "{}", text);
        self.emit(text);
    }

    /// Surface an error string.
    pub fn error(&self, text: &str) {
        warn!(target: "slirc::info", "{}", text);
        self.emit(text);
    }

    fn emit(&self, text: &str) {
        // Clone out of the lock so a callback may replace itself.
        let callback = self.callback.read().clone();
        if let Some(callback) = callback {
            callback(text);
        }
    }
}

impl std::fmt::Debug for InfoSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfoSink")
            .field("subscribed", &self.callback.read().is_some())
            .finish()
    }
}
