use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::broadcast;

use shared::models::{BookingRecord, CustomerRecord, RoomRecord};

use super::*;
use crate::store::{
    DeskStore, RedbStore, StoreError, StoreEvent, StoreResult, TransformFn, TransformOutcome,
};
use crate::utils::Clock;

mod test_checkout;
mod test_reconcile;
mod test_views;

// ========================================================================
// Helpers
// ========================================================================

/// Fixed reference instant; tests move time with `day(n)` offsets
fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() + Duration::days(offset)
}

/// Settable clock for due-date tests
struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    fn at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

fn test_manager() -> (Arc<BookingManager>, Arc<RedbStore>, Arc<ManualClock>) {
    let store = Arc::new(RedbStore::open_in_memory().unwrap());
    let clock = ManualClock::at(day(0));
    let manager = Arc::new(BookingManager::new(store.clone(), clock.clone()));
    (manager, store, clock)
}

async fn create_customer(store: &dyn DeskStore, name: &str, selected_rooms: &str) -> String {
    let record: CustomerRecord = serde_json::from_value(serde_json::json!({
        "guest_name": name,
        "selected_rooms": selected_rooms,
    }))
    .unwrap();
    store.create_customer(&record).await.unwrap()
}

async fn room_by_no(store: &dyn DeskStore, room_no: u32) -> RoomRecord {
    store
        .rooms()
        .await
        .unwrap()
        .into_values()
        .find(|room| room.room_no == room_no)
        .unwrap_or_else(|| panic!("room {} not in store", room_no))
}

async fn room_key_by_no(store: &dyn DeskStore, room_no: u32) -> String {
    store
        .rooms()
        .await
        .unwrap()
        .into_iter()
        .find(|(_, room)| room.room_no == room_no)
        .map(|(key, _)| key)
        .unwrap_or_else(|| panic!("room {} not in store", room_no))
}

// ========================================================================
// Fault-injecting store wrapper
// ========================================================================

/// Delegating store that can be told to refuse booking writes, for
/// exercising the reservation rollback path
struct FailingStore {
    inner: Arc<RedbStore>,
    fail_put_booking: AtomicBool,
}

impl FailingStore {
    fn wrap(inner: Arc<RedbStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_put_booking: AtomicBool::new(false),
        })
    }

    fn fail_booking_writes(&self, fail: bool) {
        self.fail_put_booking.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DeskStore for FailingStore {
    async fn new_key(&self) -> StoreResult<String> {
        self.inner.new_key().await
    }

    async fn rooms(&self) -> StoreResult<BTreeMap<String, RoomRecord>> {
        self.inner.rooms().await
    }

    async fn room(&self, key: &str) -> StoreResult<Option<RoomRecord>> {
        self.inner.room(key).await
    }

    async fn put_room(&self, key: &str, room: &RoomRecord) -> StoreResult<()> {
        self.inner.put_room(key, room).await
    }

    async fn ensure_room(&self, room_no: u32, now_ms: i64) -> StoreResult<(String, RoomRecord)> {
        self.inner.ensure_room(room_no, now_ms).await
    }

    async fn transform_room(
        &self,
        key: &str,
        f: TransformFn<'_>,
    ) -> StoreResult<TransformOutcome> {
        self.inner.transform_room(key, f).await
    }

    async fn booking(&self, key: &str) -> StoreResult<Option<BookingRecord>> {
        self.inner.booking(key).await
    }

    async fn bookings(&self) -> StoreResult<BTreeMap<String, BookingRecord>> {
        self.inner.bookings().await
    }

    async fn put_booking(&self, key: &str, booking: &BookingRecord) -> StoreResult<()> {
        if self.fail_put_booking.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("injected booking write failure".into()));
        }
        self.inner.put_booking(key, booking).await
    }

    async fn customer(&self, key: &str) -> StoreResult<Option<CustomerRecord>> {
        self.inner.customer(key).await
    }

    async fn customers(&self) -> StoreResult<BTreeMap<String, CustomerRecord>> {
        self.inner.customers().await
    }

    async fn create_customer(&self, customer: &CustomerRecord) -> StoreResult<String> {
        self.inner.create_customer(customer).await
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.subscribe()
    }
}
