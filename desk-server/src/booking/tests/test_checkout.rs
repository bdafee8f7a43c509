//! Checkout protocol tests

use shared::models::BookingStatus;

use super::*;

#[tokio::test]
async fn checkout_releases_room_and_closes_booking() {
    let (manager, store, clock) = test_manager();
    let customer_id = create_customer(store.as_ref(), "Guest", "101").await;
    let booking_id = manager
        .reserve_room(&customer_id, 101, day(0), day(2))
        .await
        .unwrap();

    clock.set(day(1));
    let outcomes = manager
        .checkout(CheckoutTarget::Booking(booking_id.clone()))
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].released);
    assert!(!outcomes[0].already_checked_out);
    assert!(outcomes[0].error.is_none());

    let booking = store.booking(&booking_id).await.unwrap().unwrap();
    assert_eq!(booking.normalized_status(), BookingStatus::CheckedOut);
    assert_eq!(booking.check_out_actual, Some(day(1)));

    let room = room_by_no(store.as_ref(), 101).await;
    assert!(room.is_bookable());
    assert_eq!(room.current_booking_id, None);
}

#[tokio::test]
async fn repeated_checkout_is_a_no_op() {
    let (manager, store, clock) = test_manager();
    let booking_id = manager.reserve_room("cust", 101, day(0), day(2)).await.unwrap();

    clock.set(day(1));
    manager
        .checkout(CheckoutTarget::Booking(booking_id.clone()))
        .await
        .unwrap();

    // A later second call must not move the recorded checkout time
    clock.set(day(4));
    let outcomes = manager
        .checkout(CheckoutTarget::Booking(booking_id.clone()))
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].already_checked_out);
    assert!(!outcomes[0].released);

    let booking = store.booking(&booking_id).await.unwrap().unwrap();
    assert_eq!(booking.check_out_actual, Some(day(1)));
}

#[tokio::test]
async fn customer_checkout_covers_all_active_bookings() {
    let (manager, store, _) = test_manager();
    let customer_id = create_customer(store.as_ref(), "Guest", "101,102").await;
    manager.reserve_room(&customer_id, 101, day(0), day(2)).await.unwrap();
    manager.reserve_room(&customer_id, 102, day(0), day(2)).await.unwrap();
    manager.reserve_room("someone-else", 103, day(0), day(2)).await.unwrap();

    let outcomes = manager
        .checkout(CheckoutTarget::Customer(customer_id))
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.released));

    assert!(room_by_no(store.as_ref(), 101).await.is_bookable());
    assert!(room_by_no(store.as_ref(), 102).await.is_bookable());
    // The unrelated guest keeps their room
    assert!(!room_by_no(store.as_ref(), 103).await.is_bookable());
}

#[tokio::test]
async fn unknown_booking_is_an_error() {
    let (manager, _, _) = test_manager();
    let result = manager
        .checkout(CheckoutTarget::Booking("missing".to_string()))
        .await;
    assert!(matches!(result, Err(BookingError::BookingNotFound(_))));
}

#[tokio::test]
async fn release_never_clobbers_another_bookings_lock() {
    let (manager, store, _) = test_manager();
    let booking_id = manager.reserve_room("cust", 101, day(0), day(2)).await.unwrap();

    // Simulate a concurrent path handing the room to a different booking
    let room_key = room_key_by_no(store.as_ref(), 101).await;
    let mut room = store.room(&room_key).await.unwrap().unwrap();
    room.current_booking_id = Some("another-booking".to_string());
    store.put_room(&room_key, &room).await.unwrap();

    let outcomes = manager
        .checkout(CheckoutTarget::Booking(booking_id.clone()))
        .await
        .unwrap();

    // The booking still closes...
    let booking = store.booking(&booking_id).await.unwrap().unwrap();
    assert_eq!(booking.normalized_status(), BookingStatus::CheckedOut);
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].error.is_none());

    // ...but the other booking's lock survives
    let room = store.room(&room_key).await.unwrap().unwrap();
    assert_eq!(
        room.current_booking_id.as_deref(),
        Some("another-booking")
    );
}
