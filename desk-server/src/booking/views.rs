//! Read views
//!
//! Pure projections over the stores: room grids, dashboard counts and
//! booking detail. No invariants live here; callers may poll these or
//! re-project on the store's change feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shared::models::{BookingStatus, CustomerRecord, RoomRecord};

use super::{BookingError, BookingManager, BookingResult};
use crate::store::seed::TOTAL_ROOMS;

/// Room projection with derived availability
#[derive(Debug, Clone, Serialize)]
pub struct RoomView {
    pub key: String,
    pub room_no: u32,
    pub beds: u32,
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ac_make: Option<String>,
    pub remarks: String,
    /// "available" / "occupied", derived from the occupancy signals
    pub status: &'static str,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_booking_id: Option<String>,
}

impl RoomView {
    fn from_record(key: String, room: RoomRecord) -> Self {
        let is_available = room.is_bookable();
        Self {
            key,
            room_no: room.room_no,
            beds: room.beds,
            room_type: room.room_type,
            ac_make: room.ac_make,
            remarks: room.remarks,
            status: if is_available { "available" } else { "occupied" },
            is_available,
            current_booking_id: room.current_booking_id,
        }
    }
}

/// Dashboard aggregate counts
///
/// Always reported against the fixed inventory size, even when the
/// store holds fewer room entries.
#[derive(Debug, Clone, Serialize)]
pub struct RoomStats {
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub available_rooms: usize,
    pub occupied_room_nos: Vec<u32>,
}

/// Booking list entry
#[derive(Debug, Clone, Serialize)]
pub struct BookingSummary {
    pub id: String,
    pub customer_id: String,
    pub room_no: String,
    pub status: BookingStatus,
    pub check_in: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_expected: Option<DateTime<Utc>>,
    pub created_at: i64,
}

/// Booking detail with resolved room and customer
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetail {
    pub id: String,
    pub customer_id: String,
    pub room_no: String,
    /// All room numbers of the guest's current stay
    pub room_numbers: Vec<u32>,
    pub status: BookingStatus,
    pub check_in: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_expected: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_actual: Option<DateTime<Utc>>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRecord>,
}

impl BookingManager {
    /// Full room inventory with derived availability, sorted by room number
    pub async fn list_rooms(&self) -> BookingResult<Vec<RoomView>> {
        let mut views: Vec<RoomView> = self
            .store
            .rooms()
            .await?
            .into_iter()
            .map(|(key, room)| RoomView::from_record(key, room))
            .collect();
        views.sort_by_key(|view| view.room_no);
        Ok(views)
    }

    /// Rooms currently bookable, sorted by room number
    pub async fn available_rooms(&self) -> BookingResult<Vec<RoomView>> {
        let mut views = self.list_rooms().await?;
        views.retain(|view| view.is_available);
        Ok(views)
    }

    /// Dashboard counts
    pub async fn room_stats(&self) -> BookingResult<RoomStats> {
        let rooms = self.store.rooms().await?;
        let mut occupied_room_nos: Vec<u32> = rooms
            .values()
            .filter(|room| !room.is_bookable())
            .map(|room| room.room_no)
            .collect();
        occupied_room_nos.sort_unstable();

        let occupied_rooms = occupied_room_nos.len();
        Ok(RoomStats {
            total_rooms: TOTAL_ROOMS,
            occupied_rooms,
            available_rooms: TOTAL_ROOMS.saturating_sub(occupied_rooms),
            occupied_room_nos,
        })
    }

    /// All bookings, newest first
    pub async fn list_bookings(&self) -> BookingResult<Vec<BookingSummary>> {
        let mut summaries: Vec<BookingSummary> = self
            .store
            .bookings()
            .await?
            .into_iter()
            .map(|(id, booking)| BookingSummary {
                id,
                customer_id: booking.customer_id.clone(),
                room_no: booking.room_no.clone(),
                status: booking.normalized_status(),
                check_in: booking.check_in,
                check_out_expected: booking.check_out_expected,
                created_at: booking.created_at,
            })
            .collect();
        summaries.sort_by_key(|summary| std::cmp::Reverse(summary.created_at));
        Ok(summaries)
    }

    /// Booking detail with resolved room, customer and the guest's
    /// active room numbers (from the customer's selected-rooms field
    /// plus their other active bookings)
    pub async fn booking_detail(&self, booking_id: &str) -> BookingResult<BookingDetail> {
        let booking = self
            .store
            .booking(booking_id)
            .await?
            .ok_or_else(|| BookingError::BookingNotFound(booking_id.to_string()))?;

        let rooms = self.store.rooms().await?;
        let bookings = self.store.bookings().await?;
        let customer = self.store.customer(&booking.customer_id).await?;

        let room = booking.room_number().and_then(|room_no| {
            rooms
                .iter()
                .find(|(_, r)| r.room_no == room_no)
                .map(|(key, r)| RoomView::from_record(key.clone(), r.clone()))
        });

        let mut room_numbers: Vec<u32> = customer
            .as_ref()
            .map(|c| c.selected_room_numbers())
            .unwrap_or_default();
        for other in bookings.values() {
            if other.customer_id != booking.customer_id {
                continue;
            }
            if other.normalized_status() == BookingStatus::CheckedOut {
                continue;
            }
            if let Some(room_no) = other.room_number() {
                room_numbers.push(room_no);
            }
        }
        room_numbers.sort_unstable();
        room_numbers.dedup();

        Ok(BookingDetail {
            id: booking_id.to_string(),
            customer_id: booking.customer_id.clone(),
            room_no: booking.room_no.clone(),
            room_numbers,
            status: booking.normalized_status(),
            check_in: booking.check_in,
            check_out_expected: booking.check_out_expected,
            check_out_actual: booking.check_out_actual,
            created_at: booking.created_at,
            room,
            customer,
        })
    }
}
