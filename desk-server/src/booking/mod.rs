//! Booking core - reservation, checkout and reconciliation
//!
//! This module owns every mutation of room occupancy. The three paths:
//!
//! ```text
//! reserve_room(customer, room_no, dates)
//!     ├─ 1. Validate date range (no store mutation on failure)
//!     ├─ 2. Conditional create-or-fetch of the room (lazy provisioning)
//!     ├─ 3. Generate booking key (lock payload)
//!     ├─ 4. Atomic conditional transform: abort if occupied, else lock
//!     ├─ 5. Persist booking record (BOOKED)
//!     └─ 6. On persist failure: roll the room lock back, then surface
//!
//! checkout(booking | customer)
//!     └─ per active booking: terminal transition + conditional room
//!        release keyed on the back-reference; per-room outcome list
//!
//! reconcile(scope?)
//!     └─ sweep all bookings, force past-due stays to CHECKED_OUT and
//!        free rooms stuck occupied; idempotent, returns corrected count
//! ```
//!
//! Room state is only ever written through the store's conditional
//! transform, so two concurrent check-ins racing on one room resolve to
//! exactly one winner.

mod error;
pub use error::*;

mod checkout;
mod reconcile;
mod reserve;
mod views;

pub mod scheduler;

pub use checkout::{CheckoutTarget, RoomReleaseOutcome};
pub use views::{BookingDetail, BookingSummary, RoomStats, RoomView};

use std::sync::Arc;

use crate::store::DeskStore;
use crate::utils::Clock;

/// Booking manager
///
/// Takes the store and clock as injected dependencies; holds no global
/// state of its own, so it is cheap to clone behind an `Arc` and share
/// across HTTP handlers and the reconciliation worker.
pub struct BookingManager {
    store: Arc<dyn DeskStore>,
    clock: Arc<dyn Clock>,
}

impl BookingManager {
    pub fn new(store: Arc<dyn DeskStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl std::fmt::Debug for BookingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
