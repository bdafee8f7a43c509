//! Reconciliation sweep
//!
//! Batch repair for drift between bookings and rooms caused by paths
//! outside the reservation and checkout protocols: manual data edits,
//! clients that crashed mid-checkout, stays whose expected check-out
//! passed without an explicit checkout call.
//!
//! The sweep is a maintenance operation, not part of the hot path. It is
//! not atomic across the whole pass; each booking+room pair is corrected
//! independently, and re-running it is always safe.

use std::collections::BTreeMap;

use shared::models::{BookingStatus, RoomRecord};

use super::{BookingManager, BookingResult};
use crate::store::RoomTransform;

impl BookingManager {
    /// Sweep all bookings (optionally scoped to one customer) and repair
    /// room/booking drift.
    ///
    /// A booking is due when it is already `CHECKED_OUT` (its room may
    /// still be stuck occupied) or its expected check-out is in the
    /// past. Due bookings are forced terminal, and the linked room is
    /// freed when it references this booking or is occupied at all.
    ///
    /// The "occupied at all" clause is deliberately permissive: it
    /// clears rooms stuck occupied by orphaned bookings whose link was
    /// never written, at the cost of potentially freeing a room held by
    /// a different active booking with a broken back-reference.
    ///
    /// Returns the number of bookings for which at least one write was
    /// performed; a second run with no intervening mutations returns 0.
    pub async fn reconcile(&self, scope: Option<&str>) -> BookingResult<u32> {
        let now = self.clock.now();
        let now_ms = now.timestamp_millis();

        let bookings = self.store.bookings().await?;
        let rooms = self.store.rooms().await?;

        let mut corrected = 0u32;
        for (booking_id, booking) in bookings {
            if let Some(customer_id) = scope {
                if booking.customer_id != customer_id {
                    continue;
                }
            }

            let status = booking.normalized_status();
            let past_due = booking
                .check_out_expected
                .is_some_and(|expected| expected <= now);
            if status == BookingStatus::CheckedOut || past_due {
                let mut wrote = false;

                if status != BookingStatus::CheckedOut {
                    let mut updated = booking.clone();
                    updated.status = BookingStatus::CheckedOut.as_str().to_string();
                    updated.check_out_actual = booking
                        .check_out_actual
                        .or(booking.check_out_expected)
                        .or(Some(now));
                    if updated.check_out_expected.is_none() {
                        updated.check_out_expected = Some(now);
                    }
                    updated.updated_at = now_ms;
                    self.store.put_booking(&booking_id, &updated).await?;
                    tracing::info!(
                        booking_id = %booking_id,
                        room_no = %booking.room_no,
                        "forced past-due booking to CHECKED_OUT"
                    );
                    wrote = true;
                }

                if let Some(room_no) = booking.room_number() {
                    if let Some(room_key) = find_room_key(&rooms, room_no) {
                        if self.free_if_stuck(room_key, &booking_id, now_ms).await? {
                            wrote = true;
                        }
                    }
                }

                if wrote {
                    corrected += 1;
                }
            }
        }

        if corrected > 0 {
            tracing::info!(corrected, "reconciliation corrected bookings");
        }
        Ok(corrected)
    }

    /// Free the room if it still references the due booking, or if it is
    /// stuck occupied at all (permissive orphan cleanup). A room that is
    /// already available is left untouched, which is what makes the
    /// sweep idempotent.
    async fn free_if_stuck(
        &self,
        room_key: &str,
        booking_id: &str,
        now_ms: i64,
    ) -> BookingResult<bool> {
        let outcome = self
            .store
            .transform_room(room_key, &|current| {
                let Some(room) = current else {
                    return RoomTransform::Abort;
                };
                let linked = room.current_booking_id.as_deref() == Some(booking_id);
                if linked || !room.is_bookable() {
                    let mut room = room.clone();
                    room.release(now_ms);
                    RoomTransform::Write(room)
                } else {
                    RoomTransform::Abort
                }
            })
            .await?;

        Ok(outcome.committed())
    }
}

fn find_room_key(rooms: &BTreeMap<String, RoomRecord>, room_no: u32) -> Option<&str> {
    rooms
        .iter()
        .find(|(_, room)| room.room_no == room_no)
        .map(|(key, _)| key.as_str())
}
