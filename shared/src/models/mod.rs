//! Data models
//!
//! Shared between desk-server and frontend (via API).
//! All records are stored as JSON values under store-assigned string keys,
//! so every field that may be absent in older data carries a serde default.

pub mod booking;
pub mod customer;
pub mod room;

// Re-exports
pub use booking::*;
pub use customer::*;
pub use room::*;
