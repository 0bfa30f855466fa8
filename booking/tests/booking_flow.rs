//! End-to-end booking flow scenarios through the store.

#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::{NaiveDate, NaiveTime};
use reservapp_booking::flow::{
    BookingAction, BookingEnvironment, BookingFlowReducer, BookingFlowState,
};
use reservapp_booking::repository::{
    InMemoryReservationRepository, NotificationRecord, RecordingNotificationService,
    RepositoryError,
};
use reservapp_booking::types::{
    AddOn, BookingDateTime, BookingGuestInfo, BookingPaymentInfo, BookingServiceDetails,
    BookingStep, Money, ServiceId, VenueId,
};
use reservapp_booking::BookingError;
use reservapp_core::effect::Effect;
use reservapp_core::reducer::Reducer;
use reservapp_runtime::Store;
use reservapp_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

type FlowStore = Store<BookingFlowState, BookingAction, BookingEnvironment, BookingFlowReducer>;

struct Harness {
    store: FlowStore,
    repository: Arc<InMemoryReservationRepository>,
    notifications: Arc<RecordingNotificationService>,
}

fn harness() -> Harness {
    let repository = Arc::new(InMemoryReservationRepository::new());
    let notifications = Arc::new(RecordingNotificationService::new());
    let environment = BookingEnvironment::new(
        Arc::new(test_clock()),
        repository.clone(),
        notifications.clone(),
    );
    let store = Store::new(
        BookingFlowState::new(VenueId::new("venue-1"), ServiceId::new("dinner")),
        BookingFlowReducer::new(),
        environment,
    );
    Harness {
        store,
        repository,
        notifications,
    }
}

fn date_time() -> BookingDateTime {
    BookingDateTime {
        date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        duration_minutes: 90,
        timezone: "Europe/Madrid".to_string(),
        is_available: false,
    }
}

fn guest_info(guests: u32) -> BookingGuestInfo {
    BookingGuestInfo {
        number_of_guests: guests,
        guest_name: "Ana García".to_string(),
        guest_email: "ana@example.com".to_string(),
        guest_phone: None,
        special_requests: None,
    }
}

fn service_details() -> BookingServiceDetails {
    BookingServiceDetails {
        service_id: Some(ServiceId::new("dinner")),
        service_name: "Tasting menu".to_string(),
        base_price: Money::from_units(60),
        add_ons: vec![AddOn {
            id: "wine".to_string(),
            name: "Wine pairing".to_string(),
            price: Money::from_units(35),
            selected: true,
        }],
        total_price: Money::from_units(95),
    }
}

fn payment_info() -> BookingPaymentInfo {
    BookingPaymentInfo {
        amount: Money::from_units(95),
        currency: "EUR".to_string(),
        taxes: Money::from_units(9),
        discounts: Money::from_cents(0),
        final_amount: Money::from_units(104),
        payment_method_id: Some("pm_visa".to_string()),
        payment_intent_id: None,
    }
}

/// Drive the four data steps to completion.
async fn complete_all_steps(store: &FlowStore, guests: u32) {
    let outcome = store
        .send_and_wait_for(
            BookingAction::SubmitDateTime(date_time()),
            BookingAction::is_availability_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, BookingAction::SlotConfirmed(_)));

    store
        .send(BookingAction::SubmitGuestInfo(guest_info(guests)))
        .await
        .unwrap();
    store
        .send(BookingAction::SubmitServiceDetails(service_details()))
        .await
        .unwrap();
    store
        .send(BookingAction::SubmitPayment(payment_info()))
        .await
        .unwrap();

    assert!(store.state(BookingFlowState::is_complete).await);
}

#[tokio::test]
async fn full_flow_produces_a_confirmation() {
    let h = harness();
    complete_all_steps(&h.store, 4).await;

    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::CompleteBooking,
            BookingAction::is_submission_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();

    let BookingAction::BookingConfirmed(confirmation) = outcome else {
        panic!("expected a confirmation, got {outcome:?}");
    };

    assert!(confirmation.confirmation_number.starts_with("RES-"));
    assert!(!confirmation.requires_approval);

    let (step, stored) = h
        .store
        .state(|s| (s.current_step, s.confirmation.clone()))
        .await;
    assert_eq!(step, BookingStep::Confirmation);
    assert_eq!(stored, Some(confirmation.clone()));

    // Exactly one reservation was created, with the flow's data
    let created = h.repository.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].venue_id, VenueId::new("venue-1"));
    assert_eq!(created[0].guests, 4);

    // Both notifications went out
    h.store.shutdown(TIMEOUT).await.unwrap();
    let sent = h.notifications.sent();
    assert!(sent.contains(&NotificationRecord::GuestConfirmation(
        confirmation.reservation_id.clone()
    )));
    assert!(sent.contains(&NotificationRecord::VenueNewBooking(
        confirmation.reservation_id
    )));
}

#[tokio::test]
async fn unavailable_slot_blocks_the_first_step() {
    let h = harness();
    h.repository.set_available(false);

    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::SubmitDateTime(date_time()),
            BookingAction::is_availability_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, BookingAction::SlotRejected));

    let (completed, error) = h
        .store
        .state(|s| (s.completed_steps.clone(), s.last_error.clone()))
        .await;
    assert!(completed.is_empty());
    assert_eq!(error, Some(BookingError::SlotUnavailable));

    // The guest reselects once the slot frees up
    h.repository.set_available(true);
    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::SubmitDateTime(date_time()),
            BookingAction::is_availability_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, BookingAction::SlotConfirmed(_)));
    assert!(h
        .store
        .state(|s| s.completed_steps.contains(&BookingStep::DateTime))
        .await);
    assert!(h.store.state(|s| s.last_error.is_none()).await);
}

#[tokio::test]
async fn availability_check_failure_reads_as_unavailable() {
    let h = harness();
    h.repository
        .fail_availability_with(RepositoryError::Network("dns".to_string()));

    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::SubmitDateTime(date_time()),
            BookingAction::is_availability_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, BookingAction::SlotRejected));
    assert_eq!(
        h.store.state(|s| s.last_error.clone()).await,
        Some(BookingError::SlotUnavailable)
    );
}

#[tokio::test]
async fn premature_completion_reports_missing_steps() {
    let h = harness();

    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::CompleteBooking,
            BookingAction::is_submission_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        BookingAction::BookingFailed(BookingError::IncompleteFlow {
            missing: BookingStep::REQUIRED.to_vec(),
        })
    );
    assert!(h.store.state(|s| s.confirmation.is_none()).await);
    assert!(h.repository.created().is_empty());
}

#[tokio::test]
async fn backend_failure_surfaces_and_allows_retry() {
    let h = harness();
    complete_all_steps(&h.store, 2).await;

    h.repository
        .fail_create_with(RepositoryError::Network("timeout".to_string()));
    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::CompleteBooking,
            BookingAction::is_submission_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        BookingAction::BookingFailed(BookingError::SubmissionFailed(_))
    ));
    assert!(h.store.state(|s| s.confirmation.is_none()).await);

    // No automatic retry: the caller re-issues the command
    let fresh = Arc::new(InMemoryReservationRepository::new());
    let environment = BookingEnvironment::new(
        Arc::new(test_clock()),
        fresh,
        Arc::new(RecordingNotificationService::new()),
    );
    let state = h.store.state(Clone::clone).await;
    let store: FlowStore = Store::new(state, BookingFlowReducer::new(), environment);
    let outcome = store
        .send_and_wait_for(
            BookingAction::CompleteBooking,
            BookingAction::is_submission_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, BookingAction::BookingConfirmed(_)));
}

#[tokio::test]
async fn notification_failure_still_confirms_the_booking() {
    let h = harness();
    h.notifications.fail_all();
    complete_all_steps(&h.store, 2).await;

    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::CompleteBooking,
            BookingAction::is_submission_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();

    assert!(matches!(outcome, BookingAction::BookingConfirmed(_)));
    h.store.shutdown(TIMEOUT).await.unwrap();
    assert!(h.notifications.sent().is_empty());
    assert!(h.store.state(|s| s.confirmation.is_some()).await);
}

#[tokio::test]
async fn large_party_booking_requires_approval() {
    let h = harness();
    complete_all_steps(&h.store, 10).await;

    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::CompleteBooking,
            BookingAction::is_submission_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();

    let BookingAction::BookingConfirmed(confirmation) = outcome else {
        panic!("expected a confirmation, got {outcome:?}");
    };
    assert!(confirmation.requires_approval);
}

#[tokio::test]
async fn completed_flow_rejects_further_commands() {
    let h = harness();
    complete_all_steps(&h.store, 2).await;
    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::CompleteBooking,
            BookingAction::is_submission_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, BookingAction::BookingConfirmed(_)));

    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::SubmitGuestInfo(guest_info(2)),
            BookingAction::is_submission_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        BookingAction::BookingFailed(BookingError::FlowAlreadyCompleted)
    );
}

#[tokio::test]
async fn guest_info_first_then_unavailable_slot_then_premature_completion() {
    // The full out-of-order scenario: guest info succeeds on its own,
    // the slot is rejected, and completion reports exactly what is left.
    let h = harness();
    h.repository.set_available(false);

    h.store
        .send(BookingAction::SubmitGuestInfo(guest_info(3)))
        .await
        .unwrap();
    assert!(h
        .store
        .state(|s| s.completed_steps == [BookingStep::GuestInfo].into_iter().collect())
        .await);

    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::SubmitDateTime(date_time()),
            BookingAction::is_availability_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, BookingAction::SlotRejected));
    assert!(h
        .store
        .state(|s| s.completed_steps == [BookingStep::GuestInfo].into_iter().collect())
        .await);

    let outcome = h
        .store
        .send_and_wait_for(
            BookingAction::CompleteBooking,
            BookingAction::is_submission_outcome,
            TIMEOUT,
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        BookingAction::BookingFailed(BookingError::IncompleteFlow {
            missing: vec![
                BookingStep::DateTime,
                BookingStep::ServiceDetails,
                BookingStep::Payment,
            ],
        })
    );
}

/// Resolve the immediate feedback future a rejection effect carries.
fn first_feedback(effects: impl IntoIterator<Item = Effect<BookingAction>>) -> BookingAction {
    for effect in effects {
        if let Effect::Future(future) = effect {
            if let Some(action) = futures::executor::block_on(future) {
                return action;
            }
        }
    }
    panic!("expected a feedback effect");
}

#[test]
fn every_proper_subset_of_steps_fails_completion() {
    let reducer = BookingFlowReducer::new();
    let environment = BookingEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(InMemoryReservationRepository::new()),
        Arc::new(RecordingNotificationService::new()),
    );

    for mask in 0u8..15 {
        let mut state = BookingFlowState::new(VenueId::new("v1"), ServiceId::new("s1"));
        for (i, step) in BookingStep::REQUIRED.iter().enumerate() {
            if mask & (1 << i) != 0 {
                state.completed_steps.insert(*step);
            }
        }
        let expected_missing: Vec<BookingStep> = BookingStep::REQUIRED
            .iter()
            .copied()
            .filter(|s| !state.completed_steps.contains(s))
            .collect();

        let effects = reducer.reduce(&mut state, BookingAction::CompleteBooking, &environment);
        assert_eq!(
            first_feedback(effects),
            BookingAction::BookingFailed(BookingError::IncompleteFlow {
                missing: expected_missing,
            }),
            "subset mask {mask:#06b} must be rejected"
        );
        assert!(!state.submitting);
    }
}

#[test]
fn the_full_step_set_passes_the_completion_guard() {
    let reducer = BookingFlowReducer::new();
    let environment = BookingEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(InMemoryReservationRepository::new()),
        Arc::new(RecordingNotificationService::new()),
    );

    let mut state = BookingFlowState::new(VenueId::new("v1"), ServiceId::new("s1"));
    let mut slot = date_time();
    slot.is_available = true;
    state.date_time = Some(slot);
    state.guest_info = Some(guest_info(3));
    state.service_details = Some(service_details());
    state.payment_info = Some(payment_info());
    for step in BookingStep::REQUIRED {
        state.completed_steps.insert(step);
    }

    let effects = reducer.reduce(&mut state, BookingAction::CompleteBooking, &environment);
    assert!(state.submitting);
    assert!(matches!(
        first_feedback(effects),
        BookingAction::ReservationCreated(_)
    ));
}
