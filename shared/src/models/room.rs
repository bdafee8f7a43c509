//! Room model and availability predicate

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_beds() -> u32 {
    1
}

fn default_room_type() -> String {
    "Standard".to_string()
}

/// Room entity
///
/// Occupancy is carried by two signals that must stay consistent:
/// the `is_available` flag and the `current_booking_id` back-reference.
/// When they disagree the room is treated as occupied, so a stale flag
/// can never cause an overbooking.
///
/// Rooms are mutated only by the reservation, checkout and reconciliation
/// protocols in `desk-server`; read paths treat them as plain data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRecord {
    /// Human-facing room number, unique within the active inventory
    #[serde(default)]
    pub room_no: u32,
    /// Bed capacity
    #[serde(default = "default_beds")]
    pub beds: u32,
    /// Room category tag, e.g. "AC" / "Non AC"
    #[serde(default = "default_room_type", rename = "type")]
    pub room_type: String,
    /// Equipment remark (air-conditioner make)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac_make: Option<String>,
    #[serde(default)]
    pub remarks: String,
    /// Derived status string kept for legacy readers ("available"/"occupied")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Back-reference to the booking currently holding this room
    #[serde(default)]
    pub current_booking_id: Option<String>,
    /// Creation timestamp (unix millis)
    #[serde(default)]
    pub created_at: i64,
    /// Last update timestamp (unix millis)
    #[serde(default)]
    pub updated_at: i64,
}

impl RoomRecord {
    /// Default room created by lazy provisioning on first booking reference
    pub fn provisioned(room_no: u32, now_ms: i64) -> Self {
        Self {
            room_no,
            beds: default_beds(),
            room_type: default_room_type(),
            ac_make: None,
            remarks: String::new(),
            status: Some("available".to_string()),
            is_available: true,
            current_booking_id: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Availability predicate: can this room accept a new booking right now?
    ///
    /// Total over arbitrary partial records. Missing fields default toward
    /// "available" so legacy data stays usable, with one exception: a
    /// present `current_booking_id` always forces "occupied", regardless
    /// of what the `is_available` flag claims (the back-reference wins).
    pub fn is_bookable(&self) -> bool {
        if self.current_booking_id.is_some() {
            return false;
        }
        if !self.is_available {
            return false;
        }
        !self
            .status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("occupied"))
    }

    /// Status string derived from the occupancy signals
    pub fn derived_status(&self) -> &'static str {
        if self.is_bookable() {
            "available"
        } else {
            "occupied"
        }
    }

    /// Flip the room into the locked state for the given booking
    pub fn occupy(&mut self, booking_id: &str, now_ms: i64) {
        self.is_available = false;
        self.status = Some("occupied".to_string());
        self.current_booking_id = Some(booking_id.to_string());
        self.updated_at = now_ms;
    }

    /// Reset the room to the released state, clearing the back-reference
    pub fn release(&mut self, now_ms: i64) {
        self.is_available = true;
        self.status = Some("available".to_string());
        self.current_booking_id = None;
        self.updated_at = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_from_json(json: &str) -> RoomRecord {
        serde_json::from_str(json).expect("room json")
    }

    #[test]
    fn fresh_room_is_bookable() {
        let room = RoomRecord::provisioned(205, 0);
        assert!(room.is_bookable());
        assert_eq!(room.derived_status(), "available");
    }

    #[test]
    fn partial_record_defaults_to_available() {
        let room = room_from_json(r#"{"room_no": 7}"#);
        assert!(room.is_bookable());
        assert_eq!(room.beds, 1);
        assert_eq!(room.room_type, "Standard");
    }

    #[test]
    fn back_reference_wins_over_stale_flag() {
        // is_available lies; the back-reference must force occupied
        let room = room_from_json(
            r#"{"room_no": 7, "is_available": true, "current_booking_id": "b-1"}"#,
        );
        assert!(!room.is_bookable());
        assert_eq!(room.derived_status(), "occupied");
    }

    #[test]
    fn explicit_unavailable_flag_blocks() {
        let room = room_from_json(r#"{"room_no": 7, "is_available": false}"#);
        assert!(!room.is_bookable());
    }

    #[test]
    fn legacy_occupied_status_string_blocks() {
        let room = room_from_json(r#"{"room_no": 7, "status": "Occupied"}"#);
        assert!(!room.is_bookable());
    }

    #[test]
    fn occupy_then_release_round_trip() {
        let mut room = RoomRecord::provisioned(11, 0);
        room.occupy("b-42", 10);
        assert!(!room.is_bookable());
        assert_eq!(room.current_booking_id.as_deref(), Some("b-42"));
        room.release(20);
        assert!(room.is_bookable());
        assert_eq!(room.current_booking_id, None);
        assert_eq!(room.updated_at, 20);
    }
}
