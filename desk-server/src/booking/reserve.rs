//! Atomic reservation protocol

use chrono::{DateTime, Utc};

use shared::models::{BookingRecord, BookingStatus, RoomRecord};

use super::{BookingError, BookingManager, BookingResult};
use crate::store::RoomTransform;

impl BookingManager {
    /// Reserve a room for a guest.
    ///
    /// Allocates exactly one room to exactly one new booking. The room
    /// lock is a single conditional transform against the store, so of
    /// two concurrent callers targeting the same room exactly one wins;
    /// the loser observes the committed lock and aborts with
    /// [`BookingError::RoomNotAvailable`] and no partial writes.
    ///
    /// `check_out == check_in` is permitted (same-day stay).
    pub async fn reserve_room(
        &self,
        customer_id: &str,
        room_no: u32,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> BookingResult<String> {
        if check_out < check_in {
            return Err(BookingError::InvalidDateRange);
        }

        let now = self.clock.now();
        let now_ms = now.timestamp_millis();

        // Lazy provisioning: conditional create-or-fetch in one write
        // transaction, so a concurrent reservation of the same unseen
        // room number cannot create it twice.
        let (room_key, _) = self
            .store
            .ensure_room(room_no, now_ms)
            .await
            .map_err(|source| BookingError::RoomProvisioningFailed { room_no, source })?;

        // The booking key doubles as the lock payload, so it must exist
        // before the room is touched.
        let booking_id = self.store.new_key().await?;

        let outcome = self
            .store
            .transform_room(&room_key, &|current| {
                let mut room = current
                    .cloned()
                    .unwrap_or_else(|| RoomRecord::provisioned(room_no, now_ms));
                if !room.is_bookable() {
                    return RoomTransform::Abort;
                }
                room.occupy(&booking_id, now_ms);
                RoomTransform::Write(room)
            })
            .await?;

        if !outcome.committed() {
            tracing::debug!(room_no, "reservation lost the room lock");
            return Err(BookingError::RoomNotAvailable(room_no));
        }

        let booking = BookingRecord {
            customer_id: customer_id.to_string(),
            room_no: room_no.to_string(),
            check_in,
            check_out_expected: Some(check_out),
            check_out_actual: None,
            status: BookingStatus::Booked.as_str().to_string(),
            created_at: now_ms,
            updated_at: now_ms,
        };

        if let Err(source) = self.store.put_booking(&booking_id, &booking).await {
            // The room must never stay locked to a booking that was
            // never written: roll the lock back before surfacing.
            self.rollback_room_lock(&room_key, &booking_id).await;
            return Err(BookingError::BookingPersistFailed { booking_id, source });
        }

        tracing::info!(
            room_no,
            booking_id = %booking_id,
            customer_id,
            "room reserved"
        );
        Ok(booking_id)
    }

    /// Reserve several rooms for one guest in a single request.
    ///
    /// Each room is reserved via an independent application of the
    /// protocol: a failure partway through leaves earlier rooms locked
    /// to already-written bookings. Any all-or-nothing semantics are the
    /// caller's responsibility.
    pub async fn reserve_rooms(
        &self,
        customer_id: &str,
        room_nos: &[u32],
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Vec<(u32, BookingResult<String>)> {
        let mut results = Vec::with_capacity(room_nos.len());
        for &room_no in room_nos {
            let result = self
                .reserve_room(customer_id, room_no, check_in, check_out)
                .await;
            results.push((room_no, result));
        }
        results
    }

    /// Undo a committed room lock after the booking write failed.
    ///
    /// Conditional on the room still referencing this booking: if a
    /// concurrent reconciliation already cleared or reassigned the room,
    /// there is nothing left to undo.
    async fn rollback_room_lock(&self, room_key: &str, booking_id: &str) {
        let now_ms = self.clock.now_ms();
        let result = self
            .store
            .transform_room(room_key, &|current| match current {
                Some(room) if room.current_booking_id.as_deref() == Some(booking_id) => {
                    let mut room = room.clone();
                    room.release(now_ms);
                    RoomTransform::Write(room)
                }
                _ => RoomTransform::Abort,
            })
            .await;

        match result {
            Ok(_) => {
                tracing::warn!(room_key, booking_id, "rolled back room lock after failed booking write");
            }
            Err(error) => {
                // A room stuck locked to a nonexistent booking is the
                // worst failure mode in this system; log loudly so an
                // operator can run a reconciliation pass.
                tracing::error!(
                    room_key,
                    booking_id,
                    error = %error,
                    "failed to roll back room lock"
                );
            }
        }
    }
}
