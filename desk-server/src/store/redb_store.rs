//! redb-based store implementation
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `rooms` | room key (uuid) | JSON-serialized `RoomRecord` |
//! | `bookings` | booking key (uuid) | JSON-serialized `BookingRecord` |
//! | `customers` | customer key (uuid) | JSON-serialized `CustomerRecord` |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: the database
//! file is always in a consistent state, and a commit is persistent as
//! soon as it returns. Front-desk terminals are routinely power-cycled,
//! so this matters.
//!
//! # Atomicity
//!
//! redb is single-writer. `transform_room` and `ensure_room` each run
//! as one write transaction, which is what gives the reservation
//! protocol its check-and-set guarantee.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use uuid::Uuid;

use shared::models::{BookingRecord, CustomerRecord, RoomRecord};

use super::{
    DeskStore, RoomTransform, StoreEvent, StoreResult, TransformFn, TransformOutcome,
};

const ROOMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("rooms");
const BOOKINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("bookings");
const CUSTOMERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("customers");

/// Change feed capacity; lagging dashboard subscribers just resubscribe
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Front-desk store backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    events: broadcast::Sender<StoreEvent>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::with_database(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::with_database(db)
    }

    fn with_database(db: Database) -> StoreResult<Self> {
        // Create all tables up front so read transactions never race
        // table creation
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ROOMS_TABLE)?;
            let _ = write_txn.open_table(BOOKINGS_TABLE)?;
            let _ = write_txn.open_table(CUSTOMERS_TABLE)?;
        }
        write_txn.commit()?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            db: Arc::new(db),
            events,
        })
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn read_one<T: DeserializeOwned>(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        key: &str,
    ) -> StoreResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table_def)?;
        match table.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn read_all<T: DeserializeOwned>(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
    ) -> StoreResult<BTreeMap<String, T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table_def)?;

        let mut records = BTreeMap::new();
        for result in table.iter()? {
            let (key, value) = result?;
            let record: T = serde_json::from_slice(value.value())?;
            records.insert(key.value().to_string(), record);
        }
        Ok(records)
    }

    fn write_one<T: Serialize>(
        &self,
        table_def: TableDefinition<&str, &[u8]>,
        key: &str,
        record: &T,
        event: StoreEvent,
    ) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(table_def)?;
            let value = serde_json::to_vec(record)?;
            table.insert(key, value.as_slice())?;
        }
        txn.commit()?;
        self.notify(event);
        Ok(())
    }
}

#[async_trait]
impl DeskStore for RedbStore {
    async fn new_key(&self) -> StoreResult<String> {
        Ok(Uuid::new_v4().to_string())
    }

    // ========== Rooms ==========

    async fn rooms(&self) -> StoreResult<BTreeMap<String, RoomRecord>> {
        self.read_all(ROOMS_TABLE)
    }

    async fn room(&self, key: &str) -> StoreResult<Option<RoomRecord>> {
        self.read_one(ROOMS_TABLE, key)
    }

    async fn put_room(&self, key: &str, room: &RoomRecord) -> StoreResult<()> {
        self.write_one(ROOMS_TABLE, key, room, StoreEvent::RoomsChanged)
    }

    async fn ensure_room(&self, room_no: u32, now_ms: i64) -> StoreResult<(String, RoomRecord)> {
        let txn = self.db.begin_write()?;
        let entry: (String, RoomRecord);
        let created: bool;
        {
            let mut table = txn.open_table(ROOMS_TABLE)?;
            let mut existing: Option<(String, RoomRecord)> = None;
            for result in table.iter()? {
                let (key, value) = result?;
                let room: RoomRecord = serde_json::from_slice(value.value())?;
                if room.room_no == room_no {
                    existing = Some((key.value().to_string(), room));
                    break;
                }
            }

            match existing {
                Some(found) => {
                    entry = found;
                    created = false;
                }
                None => {
                    let key = Uuid::new_v4().to_string();
                    let room = RoomRecord::provisioned(room_no, now_ms);
                    let value = serde_json::to_vec(&room)?;
                    table.insert(key.as_str(), value.as_slice())?;
                    entry = (key, room);
                    created = true;
                }
            }
        }

        if created {
            txn.commit()?;
            self.notify(StoreEvent::RoomsChanged);
        } else {
            txn.abort()?;
        }

        Ok(entry)
    }

    async fn transform_room(
        &self,
        key: &str,
        f: TransformFn<'_>,
    ) -> StoreResult<TransformOutcome> {
        let txn = self.db.begin_write()?;
        let outcome;
        {
            let mut table = txn.open_table(ROOMS_TABLE)?;
            let current: Option<RoomRecord> = match table.get(key)? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };

            match f(current.as_ref()) {
                RoomTransform::Abort => {
                    outcome = TransformOutcome::Aborted;
                }
                RoomTransform::Write(room) => {
                    let value = serde_json::to_vec(&room)?;
                    table.insert(key, value.as_slice())?;
                    outcome = TransformOutcome::Committed(room);
                }
            }
        }

        match &outcome {
            TransformOutcome::Committed(_) => {
                txn.commit()?;
                self.notify(StoreEvent::RoomsChanged);
            }
            TransformOutcome::Aborted => {
                txn.abort()?;
            }
        }
        Ok(outcome)
    }

    // ========== Bookings ==========

    async fn booking(&self, key: &str) -> StoreResult<Option<BookingRecord>> {
        self.read_one(BOOKINGS_TABLE, key)
    }

    async fn bookings(&self) -> StoreResult<BTreeMap<String, BookingRecord>> {
        self.read_all(BOOKINGS_TABLE)
    }

    async fn put_booking(&self, key: &str, booking: &BookingRecord) -> StoreResult<()> {
        self.write_one(BOOKINGS_TABLE, key, booking, StoreEvent::BookingsChanged)
    }

    // ========== Customers ==========

    async fn customer(&self, key: &str) -> StoreResult<Option<CustomerRecord>> {
        self.read_one(CUSTOMERS_TABLE, key)
    }

    async fn customers(&self) -> StoreResult<BTreeMap<String, CustomerRecord>> {
        self.read_all(CUSTOMERS_TABLE)
    }

    async fn create_customer(&self, customer: &CustomerRecord) -> StoreResult<String> {
        let key = Uuid::new_v4().to_string();
        self.write_one(CUSTOMERS_TABLE, &key, customer, StoreEvent::CustomersChanged)?;
        Ok(key)
    }

    // ========== Change feed ==========

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
