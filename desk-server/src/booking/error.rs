use thiserror::Error;

use crate::store::StoreError;
use crate::utils::AppError;

/// Booking protocol errors
#[derive(Debug, Error)]
pub enum BookingError {
    /// Lock contention lost or room already occupied. Never retried
    /// automatically: the caller picked the room from stale information
    /// and must refresh.
    #[error("Room {0} is not available")]
    RoomNotAvailable(u32),

    #[error("Check-out date is before check-in date")]
    InvalidDateRange,

    #[error("Failed to provision room {room_no}: {source}")]
    RoomProvisioningFailed {
        room_no: u32,
        #[source]
        source: StoreError,
    },

    /// Booking write failed after the room lock committed; the lock has
    /// been rolled back before this error surfaces.
    #[error("Failed to persist booking {booking_id}: {source}")]
    BookingPersistFailed {
        booking_id: String,
        #[source]
        source: StoreError,
    },

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::RoomNotAvailable(room_no) => {
                AppError::conflict(format!("Room {} is not available", room_no))
            }
            BookingError::InvalidDateRange => {
                AppError::validation("Check-out date is before check-in date")
            }
            BookingError::BookingNotFound(id) => {
                AppError::not_found(format!("Booking {} not found", id))
            }
            err @ (BookingError::RoomProvisioningFailed { .. }
            | BookingError::BookingPersistFailed { .. }
            | BookingError::Store(_)) => AppError::database(err.to_string()),
        }
    }
}
