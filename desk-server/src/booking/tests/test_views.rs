//! Read view tests

use shared::models::BookingStatus;

use super::*;
use crate::store::seed::{TOTAL_ROOMS, seed_default_rooms};

#[tokio::test]
async fn stats_count_against_the_fixed_inventory() {
    let (manager, _, _) = test_manager();
    manager.reserve_room("cust", 101, day(0), day(2)).await.unwrap();
    manager.reserve_room("cust", 2, day(0), day(2)).await.unwrap();

    let stats = manager.room_stats().await.unwrap();
    // Total is the fixed hotel size even though only two records exist
    assert_eq!(stats.total_rooms, TOTAL_ROOMS);
    assert_eq!(stats.occupied_rooms, 2);
    assert_eq!(stats.available_rooms, TOTAL_ROOMS - 2);
    assert_eq!(stats.occupied_room_nos, vec![2, 101]);
}

#[tokio::test]
async fn available_rooms_excludes_occupied_and_stays_sorted() {
    let (manager, store, _) = test_manager();
    seed_default_rooms(store.as_ref(), day(0).timestamp_millis())
        .await
        .unwrap();
    manager.reserve_room("cust", 101, day(0), day(2)).await.unwrap();

    let available = manager.available_rooms().await.unwrap();
    assert_eq!(available.len(), TOTAL_ROOMS - 1);
    assert!(available.iter().all(|room| room.room_no != 101));

    let mut sorted: Vec<u32> = available.iter().map(|r| r.room_no).collect();
    sorted.dedup();
    let mut expected = sorted.clone();
    expected.sort_unstable();
    assert_eq!(sorted, expected);
}

#[tokio::test]
async fn bookings_list_newest_first() {
    let (manager, _, clock) = test_manager();
    let first = manager.reserve_room("cust", 101, day(0), day(2)).await.unwrap();
    clock.set(day(1));
    let second = manager.reserve_room("cust", 102, day(1), day(2)).await.unwrap();

    let summaries = manager.list_bookings().await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, second);
    assert_eq!(summaries[1].id, first);
}

#[tokio::test]
async fn booking_detail_aggregates_the_guests_stay() {
    let (manager, store, _) = test_manager();
    let customer_id = create_customer(store.as_ref(), "Guest", "101,102").await;
    let booking_id = manager
        .reserve_room(&customer_id, 101, day(0), day(2))
        .await
        .unwrap();
    manager.reserve_room(&customer_id, 103, day(0), day(2)).await.unwrap();

    let detail = manager.booking_detail(&booking_id).await.unwrap();
    assert_eq!(detail.status, BookingStatus::Booked);
    assert_eq!(detail.room_no, "101");
    // Selected rooms from the guest record plus their other active
    // bookings, deduplicated
    assert_eq!(detail.room_numbers, vec![101, 102, 103]);
    assert_eq!(detail.room.as_ref().unwrap().room_no, 101);
    assert_eq!(detail.customer.as_ref().unwrap().guest_name, "Guest");
}

#[tokio::test]
async fn booking_detail_for_unknown_id_is_an_error() {
    let (manager, _, _) = test_manager();
    let result = manager.booking_detail("missing").await;
    assert!(matches!(result, Err(BookingError::BookingNotFound(_))));
}
