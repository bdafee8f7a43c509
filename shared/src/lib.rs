//! Shared types for the front-desk system
//!
//! Domain models used by the desk server and any API client:
//! rooms, bookings (with status normalization), and customers.
//! Record types tolerate partial legacy data via serde defaults;
//! all status strings are normalized at the read boundary.

pub mod models;

// Re-exports
pub use models::{BookingRecord, BookingStatus, CustomerRecord, RoomRecord};
pub use serde::{Deserialize, Serialize};
