//! Reconciliation sweep tests

use shared::models::BookingStatus;

use super::*;

#[tokio::test]
async fn past_due_booking_is_forced_out_and_room_freed() {
    let (manager, store, clock) = test_manager();
    let booking_id = manager.reserve_room("cust", 101, day(0), day(2)).await.unwrap();

    clock.set(day(3));
    let corrected = manager.reconcile(None).await.unwrap();
    assert_eq!(corrected, 1);

    let booking = store.booking(&booking_id).await.unwrap().unwrap();
    assert_eq!(booking.normalized_status(), BookingStatus::CheckedOut);
    // Actual checkout is backfilled from the expected date, not the
    // sweep time
    assert_eq!(booking.check_out_actual, Some(day(2)));

    let room = room_by_no(store.as_ref(), 101).await;
    assert!(room.is_bookable());
    assert_eq!(room.current_booking_id, None);
}

#[tokio::test]
async fn sweep_is_idempotent() {
    let (manager, _, clock) = test_manager();
    manager.reserve_room("cust", 101, day(0), day(2)).await.unwrap();

    clock.set(day(3));
    assert_eq!(manager.reconcile(None).await.unwrap(), 1);
    assert_eq!(manager.reconcile(None).await.unwrap(), 0);
}

#[tokio::test]
async fn scoped_sweep_skips_other_customers() {
    let (manager, store, clock) = test_manager();
    let a = manager.reserve_room("cust-a", 101, day(0), day(1)).await.unwrap();
    let b = manager.reserve_room("cust-b", 102, day(0), day(1)).await.unwrap();

    clock.set(day(2));
    let corrected = manager.reconcile(Some("cust-a")).await.unwrap();
    assert_eq!(corrected, 1);

    let booking_a = store.booking(&a).await.unwrap().unwrap();
    let booking_b = store.booking(&b).await.unwrap().unwrap();
    assert_eq!(booking_a.normalized_status(), BookingStatus::CheckedOut);
    assert_eq!(booking_b.normalized_status(), BookingStatus::Booked);
    assert!(!room_by_no(store.as_ref(), 102).await.is_bookable());
}

#[tokio::test]
async fn stuck_room_behind_closed_booking_is_freed() {
    let (manager, store, _) = test_manager();
    let booking_id = manager.reserve_room("cust", 101, day(0), day(5)).await.unwrap();

    // Close the booking directly, leaving the room stuck occupied (a
    // client that crashed between the two checkout writes)
    let mut booking = store.booking(&booking_id).await.unwrap().unwrap();
    booking.status = BookingStatus::CheckedOut.as_str().to_string();
    booking.check_out_actual = Some(day(1));
    store.put_booking(&booking_id, &booking).await.unwrap();
    assert!(!room_by_no(store.as_ref(), 101).await.is_bookable());

    let corrected = manager.reconcile(None).await.unwrap();
    assert_eq!(corrected, 1);
    assert!(room_by_no(store.as_ref(), 101).await.is_bookable());
}

#[tokio::test]
async fn active_booking_before_due_date_is_untouched() {
    let (manager, store, clock) = test_manager();
    let booking_id = manager.reserve_room("cust", 101, day(0), day(5)).await.unwrap();

    clock.set(day(1));
    assert_eq!(manager.reconcile(None).await.unwrap(), 0);

    let booking = store.booking(&booking_id).await.unwrap().unwrap();
    assert_eq!(booking.normalized_status(), BookingStatus::Booked);
    assert!(!room_by_no(store.as_ref(), 101).await.is_bookable());
}

#[tokio::test]
async fn legacy_status_spellings_are_treated_as_closed() {
    let (manager, store, _) = test_manager();
    let booking_id = manager.reserve_room("cust", 101, day(0), day(5)).await.unwrap();

    // Old clients wrote the terminal status without the underscore
    let mut booking = store.booking(&booking_id).await.unwrap().unwrap();
    booking.status = "CHECKEDOUT".to_string();
    store.put_booking(&booking_id, &booking).await.unwrap();

    let corrected = manager.reconcile(None).await.unwrap();
    assert_eq!(corrected, 1);
    assert!(room_by_no(store.as_ref(), 101).await.is_bookable());
}
