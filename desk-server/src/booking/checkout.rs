//! Checkout protocol

use serde::Serialize;

use shared::models::{BookingRecord, BookingStatus};

use super::{BookingError, BookingManager, BookingResult};
use crate::store::RoomTransform;

/// Checkout scope: a single booking, or every active booking held by a
/// guest (grouped multi-room stays)
#[derive(Debug, Clone)]
pub enum CheckoutTarget {
    Booking(String),
    Customer(String),
}

/// Per-room outcome of a checkout call
///
/// Releases are independent: one room failing never blocks the others
/// in the same multi-room checkout.
#[derive(Debug, Clone, Serialize)]
pub struct RoomReleaseOutcome {
    pub booking_id: String,
    pub room_no: String,
    /// The room is no longer locked to this booking
    pub released: bool,
    /// The booking was already checked out; nothing was written
    pub already_checked_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookingManager {
    /// Close out active bookings and release their rooms.
    ///
    /// Idempotent: a booking that is already `CHECKED_OUT` produces a
    /// no-op outcome, not an error.
    pub async fn checkout(
        &self,
        target: CheckoutTarget,
    ) -> BookingResult<Vec<RoomReleaseOutcome>> {
        let targets: Vec<(String, BookingRecord)> = match target {
            CheckoutTarget::Booking(id) => {
                let booking = self
                    .store
                    .booking(&id)
                    .await?
                    .ok_or_else(|| BookingError::BookingNotFound(id.clone()))?;
                vec![(id, booking)]
            }
            CheckoutTarget::Customer(customer_id) => self
                .store
                .bookings()
                .await?
                .into_iter()
                .filter(|(_, booking)| {
                    booking.customer_id == customer_id
                        && booking.normalized_status() != BookingStatus::CheckedOut
                })
                .collect(),
        };

        let mut outcomes = Vec::with_capacity(targets.len());
        for (booking_id, booking) in targets {
            outcomes.push(self.checkout_one(&booking_id, &booking).await);
        }

        let released = outcomes.iter().filter(|o| o.released).count();
        tracing::info!(released, total = outcomes.len(), "checkout completed");
        Ok(outcomes)
    }

    async fn checkout_one(
        &self,
        booking_id: &str,
        booking: &BookingRecord,
    ) -> RoomReleaseOutcome {
        if booking.normalized_status() == BookingStatus::CheckedOut {
            return RoomReleaseOutcome {
                booking_id: booking_id.to_string(),
                room_no: booking.room_no.clone(),
                released: false,
                already_checked_out: true,
                error: None,
            };
        }

        let now = self.clock.now();
        let now_ms = now.timestamp_millis();

        let mut updated = booking.clone();
        updated.status = BookingStatus::CheckedOut.as_str().to_string();
        updated.check_out_actual = Some(now);
        if updated.check_out_expected.is_none() {
            updated.check_out_expected = Some(now);
        }
        updated.updated_at = now_ms;

        if let Err(error) = self.store.put_booking(booking_id, &updated).await {
            return RoomReleaseOutcome {
                booking_id: booking_id.to_string(),
                room_no: booking.room_no.clone(),
                released: false,
                already_checked_out: false,
                error: Some(error.to_string()),
            };
        }

        match self.release_room(booking, booking_id, now_ms).await {
            Ok(()) => RoomReleaseOutcome {
                booking_id: booking_id.to_string(),
                room_no: booking.room_no.clone(),
                released: true,
                already_checked_out: false,
                error: None,
            },
            Err(error) => RoomReleaseOutcome {
                booking_id: booking_id.to_string(),
                room_no: booking.room_no.clone(),
                released: false,
                already_checked_out: false,
                error: Some(error.to_string()),
            },
        }
    }

    /// Release the room held by a booking.
    ///
    /// This call is the authority releasing the room, so no availability
    /// check is needed, but the reset is still keyed on the room's
    /// back-reference: if a different booking has since claimed the room
    /// (e.g. after a concurrent reconciliation freed it), its lock must
    /// not be clobbered.
    async fn release_room(
        &self,
        booking: &BookingRecord,
        booking_id: &str,
        now_ms: i64,
    ) -> BookingResult<()> {
        let Some(room_no) = booking.room_number() else {
            // Unparseable legacy room reference; the booking is closed,
            // there is no room to release.
            tracing::warn!(booking_id, room_no = %booking.room_no, "booking has no parseable room number");
            return Ok(());
        };

        let (room_key, _) = self.store.ensure_room(room_no, now_ms).await?;
        let outcome = self
            .store
            .transform_room(&room_key, &|current| match current {
                Some(room) if room.current_booking_id.as_deref() == Some(booking_id) => {
                    let mut room = room.clone();
                    room.release(now_ms);
                    RoomTransform::Write(room)
                }
                _ => RoomTransform::Abort,
            })
            .await?;

        if !outcome.committed() {
            tracing::debug!(
                room_no,
                booking_id,
                "room no longer references this booking; release skipped"
            );
        }
        Ok(())
    }
}
