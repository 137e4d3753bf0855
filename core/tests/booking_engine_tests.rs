// tests/booking_engine_tests.rs
mod common;

use common::*;
use rust_decimal::Decimal;
use serde_json::json;
use slotbook::checkout::steps::{
  CHECK_AMOUNTS, CHECK_EMAIL_FORMAT, CHECK_QUANTITY, CHECK_REQUIRED_FIELDS, RESERVE_AND_RECORD, REVALIDATE_PROMO_CODE,
};
use slotbook::reference::is_well_formed;
use slotbook::{BookingEngine, BookingError, BookingStatus, BookingStore, CheckoutPolicy, CreateBookingRequest, ErrorKind};
use uuid::Uuid;

async fn available(fx: &Fixture) -> i32 {
  fx.store.find_slot(fx.slot.id).await.unwrap().unwrap().available_count
}

#[tokio::test]
async fn test_successful_booking_is_confirmed_and_decrements() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::new(fx.store.clone());

  let confirmation = engine.create_booking(request_for(&fx.slot, 3)).await.unwrap();

  assert_eq!(confirmation.status, BookingStatus::Confirmed);
  assert!(is_well_formed(&confirmation.reference_id));
  assert_eq!(confirmation.reference_id.len(), 8);
  assert_eq!(available(&fx).await, 7);

  let stored = fx
    .store
    .find_booking_by_reference(&confirmation.reference_id)
    .await
    .unwrap()
    .expect("booking should be stored");
  assert_eq!(stored.id, confirmation.booking_id);
  assert_eq!(stored.quantity, 3);
  assert_eq!(stored.total_amount, Decimal::from(1059 * 3));
  assert_eq!(stored.customer_email, "asha@example.com");
  assert_eq!(stored.promo_code, None);
}

#[tokio::test]
async fn test_empty_request_lists_every_required_field() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::new(fx.store.clone());

  let err = engine.create_booking(CreateBookingRequest::default()).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Validation);
  let details = err.details().unwrap();
  assert_eq!(
    details["missing"],
    json!(["experienceId", "slotId", "date", "time", "quantity", "customerName", "customerEmail", "agreedToTerms"])
  );
  assert_eq!(details["required"], details["missing"]);
}

#[tokio::test]
async fn test_terms_must_be_agreed() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::new(fx.store.clone());
  let request = CreateBookingRequest {
    agreed_to_terms: Some(false),
    ..request_for(&fx.slot, 1)
  };

  let err = engine.create_booking(request).await.unwrap_err();

  match err {
    BookingError::MissingFields { missing, .. } => assert_eq!(missing, vec!["agreedToTerms"]),
    other => panic!("expected missing fields, got {other:?}"),
  }
  assert_eq!(available(&fx).await, 10);
}

#[tokio::test]
async fn test_presence_is_checked_before_email_and_email_before_quantity() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::new(fx.store.clone());

  let bad_everything = CreateBookingRequest {
    customer_name: None,
    customer_email: Some("not-an-email".to_string()),
    quantity: Some(0),
    ..request_for(&fx.slot, 1)
  };
  let err = engine.create_booking(bad_everything.clone()).await.unwrap_err();
  assert!(matches!(err, BookingError::MissingFields { .. }));

  let bad_email_and_quantity = CreateBookingRequest {
    customer_name: Some("Asha".to_string()),
    ..bad_everything
  };
  let err = engine.create_booking(bad_email_and_quantity.clone()).await.unwrap_err();
  assert_eq!(err.to_string(), "Invalid email format");

  let bad_quantity = CreateBookingRequest {
    customer_email: Some("asha@example.com".to_string()),
    ..bad_email_and_quantity
  };
  let err = engine.create_booking(bad_quantity).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(err.to_string(), "Quantity must be at least 1");

  assert_eq!(available(&fx).await, 10);
  assert!(fx.store.bookings().is_empty());
}

#[tokio::test]
async fn test_unknown_and_malformed_slot_ids_are_not_found() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::new(fx.store.clone());

  let unknown = CreateBookingRequest {
    slot_id: Some(Uuid::new_v4().to_string()),
    ..request_for(&fx.slot, 1)
  };
  let err = engine.create_booking(unknown).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert_eq!(err.to_string(), "Slot not found");

  let malformed = CreateBookingRequest {
    slot_id: Some("slot-42".to_string()),
    ..request_for(&fx.slot, 1)
  };
  let err = engine.create_booking(malformed).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);

  assert!(fx.store.bookings().is_empty());
}

#[tokio::test]
async fn test_slot_of_another_experience_is_not_found() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::new(fx.store.clone());
  let request = CreateBookingRequest {
    experience_id: Some(Uuid::new_v4().to_string()),
    ..request_for(&fx.slot, 1)
  };

  let err = engine.create_booking(request).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert_eq!(available(&fx).await, 10);
}

#[tokio::test]
async fn test_over_capacity_request_reports_counts_and_changes_nothing() {
  setup_tracing();
  let fx = seeded(10, 2);
  let engine = BookingEngine::new(fx.store.clone());

  let err = engine.create_booking(request_for(&fx.slot, 3)).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::SlotUnavailable);
  assert_eq!(err.to_string(), "The selected time slot is no longer available");
  assert_eq!(err.details(), Some(json!({"requested": 3, "available": 2})));
  assert_eq!(available(&fx).await, 2);
  assert!(fx.store.bookings().is_empty());
}

#[tokio::test]
async fn test_exact_remaining_capacity_can_be_booked() {
  setup_tracing();
  let fx = seeded(10, 2);
  let engine = BookingEngine::new(fx.store.clone());

  engine.create_booking(request_for(&fx.slot, 2)).await.unwrap();
  assert_eq!(available(&fx).await, 0);

  let err = engine.create_booking(request_for(&fx.slot, 1)).await.unwrap_err();
  assert_eq!(err.details(), Some(json!({"requested": 1, "available": 0})));
}

#[tokio::test]
async fn test_promo_code_is_revalidated_at_checkout() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::new(fx.store.clone());

  for (code, message) in [
    ("OLDCODE", "Promo code is no longer active"),
    ("LATER", "Promo code has expired or is not yet valid"),
    ("NOPE", "Invalid promo code"),
  ] {
    let request = CreateBookingRequest {
      promo_code: Some(code.to_string()),
      ..request_for(&fx.slot, 1)
    };
    let err = engine.create_booking(request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPromoCode, "code {code}");
    assert_eq!(err.to_string(), message);
  }
  assert_eq!(available(&fx).await, 10);
}

#[tokio::test]
async fn test_promo_code_is_stored_normalized() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::new(fx.store.clone());
  let request = CreateBookingRequest {
    promo_code: Some(" save10 ".to_string()),
    discount_amount: Some(Decimal::from(99)),
    ..request_for(&fx.slot, 1)
  };

  let confirmation = engine.create_booking(request).await.unwrap();

  let stored = fx.store.find_booking_by_reference(&confirmation.reference_id).await.unwrap().unwrap();
  assert_eq!(stored.promo_code.as_deref(), Some("SAVE10"));
  // The submitted discount is recorded as-is.
  assert_eq!(stored.discount_amount, Decimal::from(99));
}

#[tokio::test]
async fn test_revalidation_can_be_switched_off() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::with_policy(fx.store.clone(), CheckoutPolicy { revalidate_promo: false });
  let request = CreateBookingRequest {
    promo_code: Some("OLDCODE".to_string()),
    ..request_for(&fx.slot, 1)
  };

  assert!(engine.create_booking(request).await.is_ok());
  assert_eq!(available(&fx).await, 9);
}

#[tokio::test]
async fn test_colliding_reference_is_redrawn() {
  setup_tracing();
  let fx = seeded(10, 10);
  let first = BookingEngine::new(fx.store.clone()).with_references(scripted_references(&["AAAAAAAA"], 4));
  let second =
    BookingEngine::new(fx.store.clone()).with_references(scripted_references(&["AAAAAAAA", "BBBBBBBB"], 4));

  let a = first.create_booking(request_for(&fx.slot, 1)).await.unwrap();
  let b = second.create_booking(request_for(&fx.slot, 1)).await.unwrap();

  assert_eq!(a.reference_id, "AAAAAAAA");
  assert_eq!(b.reference_id, "BBBBBBBB");
  assert_eq!(available(&fx).await, 8);
}

#[tokio::test]
async fn test_reference_space_falls_back_then_exhausts() {
  setup_tracing();
  let fx = seeded(10, 10);
  // Empty script: every draw is the filler "ZZZZZZZZ" (or 12 Z's in the fallback space).
  let engine = BookingEngine::new(fx.store.clone()).with_references(scripted_references(&[], 1));

  let primary = engine.create_booking(request_for(&fx.slot, 1)).await.unwrap();
  let fallback = engine.create_booking(request_for(&fx.slot, 1)).await.unwrap();
  assert_eq!(primary.reference_id, "ZZZZZZZZ");
  assert_eq!(fallback.reference_id, "ZZZZZZZZZZZZ");

  let err = engine.create_booking(request_for(&fx.slot, 1)).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Internal);
  assert_eq!(err.public_message(), "An unexpected error occurred");
  assert_eq!(available(&fx).await, 8);
  assert_eq!(fx.store.bookings().len(), 2);
}

#[tokio::test]
async fn test_standard_pipeline_stage_order() {
  let fx = seeded(1, 1);
  let engine = BookingEngine::new(fx.store.clone());
  assert_eq!(
    engine.pipeline().step_names(),
    vec![
      CHECK_REQUIRED_FIELDS,
      CHECK_EMAIL_FORMAT,
      CHECK_QUANTITY,
      CHECK_AMOUNTS,
      REVALIDATE_PROMO_CODE,
      RESERVE_AND_RECORD
    ]
  );
}

#[tokio::test]
async fn test_out_of_range_amount_is_rejected_before_reserving() {
  setup_tracing();
  let fx = seeded(10, 10);
  let engine = BookingEngine::new(fx.store.clone());
  let request = CreateBookingRequest {
    total_amount: Some(Decimal::from(100_000_000)),
    ..request_for(&fx.slot, 1)
  };

  let err = engine.create_booking(request).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(err.to_string(), "totalAmount is out of range");
  assert_eq!(available(&fx).await, 10);
  assert!(fx.store.bookings().is_empty());
}
