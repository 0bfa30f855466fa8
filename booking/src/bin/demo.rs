//! End-to-end booking flow demo.
//!
//! Drives a full five-step flow through the store with the in-memory
//! reservation backend, then prints the confirmation. Run with:
//!
//! ```text
//! RUST_LOG=debug cargo run --bin booking-demo
//! ```

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use reservapp_booking::flow::{
    BookingAction, BookingEnvironment, BookingFlowReducer, BookingFlowState,
};
use reservapp_booking::repository::{
    InMemoryReservationRepository, RecordingNotificationService,
};
use reservapp_booking::types::{
    AddOn, BookingDateTime, BookingGuestInfo, BookingPaymentInfo, BookingServiceDetails, Money,
    ServiceId, VenueId,
};
use reservapp_core::environment::SystemClock;
use reservapp_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let repository = Arc::new(InMemoryReservationRepository::new());
    let notifications = Arc::new(RecordingNotificationService::new());

    let environment = BookingEnvironment::new(
        Arc::new(SystemClock),
        repository,
        notifications.clone(),
    );

    let store = Store::new(
        BookingFlowState::new(VenueId::new("venue-madrid-01"), ServiceId::new("dinner")),
        BookingFlowReducer::new(),
        environment,
    );

    // Step 1: date/time, gated by the availability check
    let date = NaiveDate::from_ymd_opt(2025, 6, 15).context("invalid demo date")?;
    let time = NaiveTime::from_hms_opt(19, 30, 0).context("invalid demo time")?;
    let outcome = store
        .send_and_wait_for(
            BookingAction::SubmitDateTime(BookingDateTime {
                date,
                time,
                duration_minutes: 90,
                timezone: "Europe/Madrid".to_string(),
                is_available: false,
            }),
            BookingAction::is_availability_outcome,
            SETTLE_TIMEOUT,
        )
        .await?;
    if !matches!(outcome, BookingAction::SlotConfirmed(_)) {
        bail!("slot is no longer available");
    }
    tracing::info!("slot confirmed");

    // Steps 2-4: synchronous submissions
    store
        .send(BookingAction::SubmitGuestInfo(BookingGuestInfo {
            number_of_guests: 4,
            guest_name: "Ana García".to_string(),
            guest_email: "ana.garcia@example.com".to_string(),
            guest_phone: Some("+34 600 000 000".to_string()),
            special_requests: Some("Window table, please".to_string()),
        }))
        .await?;

    store
        .send(BookingAction::SubmitServiceDetails(BookingServiceDetails {
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
        }))
        .await?;

    store
        .send(BookingAction::SubmitPayment(BookingPaymentInfo {
            amount: Money::from_units(95),
            currency: "EUR".to_string(),
            taxes: Money::from_units(9),
            discounts: Money::from_cents(0),
            final_amount: Money::from_units(104),
            payment_method_id: Some("pm_demo_visa".to_string()),
            payment_intent_id: None,
        }))
        .await?;

    let ready = store.state(|s| s.is_complete()).await;
    tracing::info!(ready, "all steps submitted");

    // Step 5: submit and wait for the flow to settle
    let outcome = store
        .send_and_wait_for(
            BookingAction::CompleteBooking,
            BookingAction::is_submission_outcome,
            SETTLE_TIMEOUT,
        )
        .await?;

    match outcome {
        BookingAction::BookingConfirmed(confirmation) => {
            println!("Booking confirmed!");
            println!("  reservation:  {}", confirmation.reservation_id);
            println!("  confirmation: {}", confirmation.confirmation_number);
            println!(
                "  venue reply by: {}",
                confirmation.estimated_confirmation_time
            );
            println!("  manual approval: {}", confirmation.requires_approval);
        },
        BookingAction::BookingFailed(error) => bail!("booking failed: {error}"),
        other => bail!("unexpected outcome: {other:?}"),
    }

    // Let the fire-and-forget notification effects drain
    store.shutdown(SETTLE_TIMEOUT).await?;
    tracing::info!(
        notifications = notifications.sent().len(),
        "notifications dispatched"
    );

    Ok(())
}
