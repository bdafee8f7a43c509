//! Store layer
//!
//! Key-addressed record store for rooms, bookings and customers.
//!
//! The one primitive the booking protocols depend on for correctness is
//! [`DeskStore::transform_room`]: an atomic conditional transform
//! (check-and-set) on a single room record. Every occupancy mutation in
//! the system goes through it; nothing may flip `is_available` or
//! `current_booking_id` with a blind write.
//!
//! [`RedbStore`] is the embedded production implementation. The trait
//! seam keeps the protocols free of any module-level singleton and lets
//! tests wrap the store for fault injection.

mod redb_store;
pub mod seed;

pub use redb_store::RedbStore;

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use shared::models::{BookingRecord, CustomerRecord, RoomRecord};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Write refused by the store (used by fault-injecting test wrappers)
    #[error("Store rejected write: {0}")]
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Decision returned by a conditional transform closure
pub enum RoomTransform {
    /// Leave the record untouched and report contention
    Abort,
    /// Replace the record with the given value
    Write(RoomRecord),
}

/// Result of a conditional transform
#[derive(Debug, Clone)]
pub enum TransformOutcome {
    Committed(RoomRecord),
    Aborted,
}

impl TransformOutcome {
    pub fn committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Change notification emitted after committed writes
///
/// Read-only consumers (room grids, dashboard counts) subscribe to this
/// feed and re-project; the booking protocols never rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    RoomsChanged,
    BookingsChanged,
    CustomersChanged,
}

/// Conditional transform closure: observes the current record (if any)
/// and decides to abort or to write a replacement.
pub type TransformFn<'a> = &'a (dyn Fn(Option<&RoomRecord>) -> RoomTransform + Send + Sync);

/// Front-desk record store
#[async_trait]
pub trait DeskStore: Send + Sync {
    /// Generate a fresh store-assigned key
    async fn new_key(&self) -> StoreResult<String>;

    // ========== Rooms ==========

    async fn rooms(&self) -> StoreResult<BTreeMap<String, RoomRecord>>;

    async fn room(&self, key: &str) -> StoreResult<Option<RoomRecord>>;

    async fn put_room(&self, key: &str, room: &RoomRecord) -> StoreResult<()>;

    /// Atomic create-or-fetch by room number (lazy provisioning)
    ///
    /// Runs as a single write transaction so two concurrent reservations
    /// of a not-yet-existing room number cannot create it twice.
    async fn ensure_room(&self, room_no: u32, now_ms: i64) -> StoreResult<(String, RoomRecord)>;

    /// Atomic conditional transform on a single room record
    ///
    /// The closure runs inside one write transaction: concurrent callers
    /// are serialized, and an `Abort` leaves the record byte-identical.
    async fn transform_room(
        &self,
        key: &str,
        f: TransformFn<'_>,
    ) -> StoreResult<TransformOutcome>;

    // ========== Bookings ==========

    async fn booking(&self, key: &str) -> StoreResult<Option<BookingRecord>>;

    async fn bookings(&self) -> StoreResult<BTreeMap<String, BookingRecord>>;

    async fn put_booking(&self, key: &str, booking: &BookingRecord) -> StoreResult<()>;

    // ========== Customers ==========

    async fn customer(&self, key: &str) -> StoreResult<Option<CustomerRecord>>;

    async fn customers(&self) -> StoreResult<BTreeMap<String, CustomerRecord>>;

    async fn create_customer(&self, customer: &CustomerRecord) -> StoreResult<String>;

    // ========== Change feed ==========

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
