//! Default value functions for configuration.

// =============================================================================
// Timeouts (milliseconds)
// =============================================================================

pub fn default_read_timeout_ms() -> u64 {
    1000
}

pub fn default_connect_timeout_ms() -> u64 {
    10_000
}

pub fn default_join_timeout_ms() -> u64 {
    1000
}

// =============================================================================
// Session
// =============================================================================

pub fn default_channel() -> String {
    "#general".to_string()
}

pub fn default_greeting() -> String {
    "hello".to_string()
}

pub fn default_port() -> u16 {
    6667
}
