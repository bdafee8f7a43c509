//! Default room inventory
//!
//! The property has a fixed inventory of 40 rooms; dashboard counts are
//! always reported against this total even when the store holds fewer
//! entries. Rooms 1 and 107-110 were taken out of service and are not
//! part of the active set.

use std::collections::HashSet;

use shared::models::RoomRecord;

use super::{DeskStore, StoreResult};

/// Total number of rooms in the property
pub const TOTAL_ROOMS: usize = 40;

/// (room_no, beds, room_type, ac_make)
const DEFAULT_INVENTORY: &[(u32, u32, &str, &str)] = &[
    (2, 3, "AC", ""),
    (3, 3, "AC", "LLOYD"),
    (4, 2, "AC", ""),
    (5, 3, "AC", ""),
    (6, 4, "AC", ""),
    (7, 4, "AC", ""),
    (8, 3, "AC", ""),
    (9, 2, "AC", ""),
    (10, 3, "AC", ""),
    (11, 3, "AC", ""),
    (101, 4, "AC", ""),
    (102, 3, "AC", ""),
    (103, 3, "AC", ""),
    (104, 2, "Non AC", ""),
    (105, 2, "AC", "LLOYD"),
    (106, 3, "AC", "LLOYD"),
    (111, 2, "Non AC", ""),
    (112, 2, "AC", "IFB"),
    (113, 3, "AC", "OLD"),
    (114, 3, "AC", ""),
    (115, 3, "AC", ""),
    (116, 4, "AC", ""),
    (201, 4, "AC", ""),
    (202, 6, "AC", "IFB"),
    (203, 4, "AC", ""),
    (204, 6, "AC", ""),
    (205, 4, "AC", "WHIRLPOOL"),
    (206, 2, "AC", "LLOYD"),
    (207, 4, "AC", "LLOYD (NEW)"),
    (208, 4, "AC", "IFB"),
    (209, 2, "AC", "LLOYD"),
    (210, 4, "AC", "DOLLER"),
    (211, 4, "Non AC", ""),
    (301, 4, "Non AC", ""),
    (302, 1, "Non AC", "Small Hall"),
    (303, 4, "AC", "LLOYD (NEW)"),
    (304, 4, "AC", "IFB, LLOYD"),
    (305, 4, "Non AC", ""),
    (306, 6, "AC", "LLOYD"),
    (307, 4, "AC", "LLOYD (NEW)"),
];

/// Seed the fixed inventory, skipping room numbers that already exist.
///
/// Idempotent; returns the number of rooms created.
pub async fn seed_default_rooms(store: &dyn DeskStore, now_ms: i64) -> StoreResult<usize> {
    let known: HashSet<u32> = store
        .rooms()
        .await?
        .values()
        .map(|room| room.room_no)
        .collect();

    let mut seeded = 0;
    for &(room_no, beds, room_type, ac_make) in DEFAULT_INVENTORY {
        if known.contains(&room_no) {
            continue;
        }
        let mut room = RoomRecord::provisioned(room_no, now_ms);
        room.beds = beds;
        room.room_type = room_type.to_string();
        if !ac_make.is_empty() {
            room.ac_make = Some(ac_make.to_string());
        }
        let key = store.new_key().await?;
        store.put_room(&key, &room).await?;
        seeded += 1;
    }

    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RedbStore;

    #[tokio::test]
    async fn seeds_full_inventory_once() {
        let store = RedbStore::open_in_memory().unwrap();

        let first = seed_default_rooms(&store, 0).await.unwrap();
        assert_eq!(first, TOTAL_ROOMS);
        assert_eq!(store.rooms().await.unwrap().len(), TOTAL_ROOMS);

        let second = seed_default_rooms(&store, 1).await.unwrap();
        assert_eq!(second, 0);
        assert_eq!(store.rooms().await.unwrap().len(), TOTAL_ROOMS);
    }

    #[tokio::test]
    async fn seed_preserves_rooms_created_by_lazy_provisioning() {
        let store = RedbStore::open_in_memory().unwrap();
        let (key, _) = store.ensure_room(205, 42).await.unwrap();

        seed_default_rooms(&store, 0).await.unwrap();

        // The provisioned room keeps its key and record
        let room = store.room(&key).await.unwrap().unwrap();
        assert_eq!(room.created_at, 42);
        assert_eq!(store.rooms().await.unwrap().len(), TOTAL_ROOMS);
    }
}
