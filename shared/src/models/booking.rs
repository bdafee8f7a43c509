//! Booking model and status state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Booking lifecycle status
///
/// State machine: `PENDING` (rare/legacy) → `BOOKED` (active, room held)
/// → `CHECKED_OUT` (terminal, room released); `CANCELLED` is a terminal
/// side transition from `BOOKED`.
///
/// Stored status values are free-form legacy strings; protocols must go
/// through [`BookingStatus::normalize`] and never branch on the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Booked,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    /// Normalize a raw stored status string into the closed state set.
    ///
    /// Unknown or missing values normalize to `Booked`: an unrecognized
    /// status must never cause a room to be treated as free.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.unwrap_or_default().trim().to_ascii_uppercase().as_str() {
            "CHECKED_OUT" | "CHECKEDOUT" => Self::CheckedOut,
            "CANCELLED" => Self::Cancelled,
            "PENDING" => Self::Pending,
            _ => Self::Booked,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Booked => "BOOKED",
            Self::CheckedOut => "CHECKED_OUT",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Terminal states: the room has been released
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }
}

fn default_status() -> String {
    BookingStatus::Booked.as_str().to_string()
}

/// Booking entity
///
/// Created by the reservation protocol in the same logical operation as
/// the room lock; mutated only by checkout (terminal transition) or the
/// reconciliation sweep (forced terminal transition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Customer holding this booking (store-assigned key)
    pub customer_id: String,
    /// Room number in string form (legacy wire shape)
    pub room_no: String,
    pub check_in: DateTime<Utc>,
    /// Expected check-out; absent in some legacy records
    #[serde(default)]
    pub check_out_expected: Option<DateTime<Utc>>,
    /// Actual check-out, written by the checkout protocol
    #[serde(default)]
    pub check_out_actual: Option<DateTime<Utc>>,
    /// Raw stored status; normalize before branching
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl BookingRecord {
    /// Status normalized into the closed state machine
    pub fn normalized_status(&self) -> BookingStatus {
        BookingStatus::normalize(Some(&self.status))
    }

    /// Room number parsed back to its integer form
    pub fn room_number(&self) -> Option<u32> {
        self.room_no.trim().parse().ok()
    }
}
