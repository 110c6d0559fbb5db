//! Transport session module
//!
//! Connection handling and response framing for the gopher exchange.

pub mod connection;
pub mod frame;

// Re-export main types
pub use connection::GopherSession;
pub use frame::{copy_raw, copy_terminated, is_raw_type, TERMINATOR_LEN};
