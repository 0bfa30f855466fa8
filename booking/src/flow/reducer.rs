//! Booking flow reducer.
//!
//! Pure sequencing logic for the five-step booking flow. Validation and
//! state transitions happen synchronously inside [`BookingFlowReducer`];
//! everything that touches a collaborator (availability gate, reservation
//! creation, notifications) is described as an [`Effect`] and executed by
//! the store, which feeds the outcome back in as an event action.
//!
//! Rejections are also fed back as events (`StepRejected`, `SlotRejected`,
//! `BookingFailed`) rather than mutated in place, so observers on the
//! store's broadcast channel see every outcome, not just the happy path.

use crate::confirmation::build_confirmation;
use crate::error::BookingError;
use crate::flow::actions::BookingAction;
use crate::flow::environment::BookingEnvironment;
use crate::flow::state::BookingFlowState;
use crate::repository::AvailabilityQuery;
use crate::types::{
    BookingDateTime, BookingGuestInfo, BookingPaymentInfo, BookingServiceDetails, BookingStep,
    CreateReservationData, Reservation,
};
use crate::validate;
use reservapp_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Shorthand for the reducer's return type
type Effects = SmallVec<[Effect<BookingAction>; 4]>;

/// Wrap an already-decided event so it flows back through the store.
fn feedback(action: BookingAction) -> Effect<BookingAction> {
    Effect::Future(Box::pin(async move { Some(action) }))
}

/// The booking flow sequencer.
///
/// Stateless; all flow state lives in [`BookingFlowState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BookingFlowReducer;

impl BookingFlowReducer {
    /// Create the reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Shape-validate a date/time selection and launch the availability
    /// gate. The payload is NOT stored here; only `SlotConfirmed` stores
    /// it, with `is_available` set by the gate rather than the caller.
    fn submit_date_time(
        state: &mut BookingFlowState,
        payload: BookingDateTime,
        env: &BookingEnvironment,
    ) -> Effects {
        if let Err(error) = validate::validate_date_time(&payload) {
            return smallvec![feedback(BookingAction::StepRejected {
                step: BookingStep::DateTime,
                error,
            })];
        }

        state.checking_availability = true;
        state.last_error = None;

        let query = AvailabilityQuery {
            venue_id: state.venue_id.clone(),
            service_id: state.service_id.clone(),
            date: payload.date,
            time: payload.time,
        };
        let repository = env.reservations.clone();

        tracing::debug!(
            venue_id = %query.venue_id,
            date = %payload.date,
            time = %payload.time,
            "checking slot availability"
        );

        smallvec![Effect::Future(Box::pin(async move {
            match repository.check_availability(&query).await {
                Ok(true) => Some(BookingAction::SlotConfirmed(payload)),
                Ok(false) => Some(BookingAction::SlotRejected),
                Err(error) => {
                    tracing::warn!(error = %error, "availability check failed");
                    Some(BookingAction::SlotRejected)
                },
            }
        }))]
    }

    fn submit_guest_info(state: &mut BookingFlowState, payload: BookingGuestInfo) -> Effects {
        match validate::validate_guest_info(&payload) {
            Ok(()) => {
                state.guest_info = Some(payload);
                state.complete_step(BookingStep::GuestInfo);
                smallvec![]
            },
            Err(error) => smallvec![feedback(BookingAction::StepRejected {
                step: BookingStep::GuestInfo,
                error,
            })],
        }
    }

    fn submit_service_details(
        state: &mut BookingFlowState,
        payload: BookingServiceDetails,
    ) -> Effects {
        match validate::validate_service_details(&payload) {
            Ok(()) => {
                state.service_details = Some(payload);
                state.complete_step(BookingStep::ServiceDetails);
                smallvec![]
            },
            Err(error) => smallvec![feedback(BookingAction::StepRejected {
                step: BookingStep::ServiceDetails,
                error,
            })],
        }
    }

    fn submit_payment(state: &mut BookingFlowState, payload: BookingPaymentInfo) -> Effects {
        match validate::validate_payment_info(&payload) {
            Ok(()) => {
                state.payment_info = Some(payload);
                state.complete_step(BookingStep::Payment);
                smallvec![]
            },
            Err(error) => smallvec![feedback(BookingAction::StepRejected {
                step: BookingStep::Payment,
                error,
            })],
        }
    }

    /// Navigate to `target`. Backward navigation always succeeds because
    /// `completed_steps` only grows; forward navigation is gated on every
    /// earlier step being complete. `Confirmation` is never a navigation
    /// target; it is reached only through a successful submission.
    fn go_to_step(state: &mut BookingFlowState, target: BookingStep) -> Effects {
        if target == BookingStep::Confirmation || !state.can_proceed_to(target) {
            let missing: Vec<BookingStep> = BookingStep::ORDER
                .iter()
                .take_while(|step| **step != target)
                .filter(|step| !state.completed_steps.contains(step))
                .copied()
                .collect();
            return smallvec![feedback(BookingAction::BookingFailed(
                BookingError::IncompleteFlow { missing }
            ))];
        }

        state.current_step = target;
        state.recompute_can_proceed();
        state.last_error = None;
        smallvec![]
    }

    /// Submit the completed flow. Guards: every required step complete,
    /// and the stored slot still marked available by the gate. The create
    /// call itself is an effect; its outcome comes back as
    /// `ReservationCreated` or `BookingFailed`.
    fn complete_booking(state: &mut BookingFlowState, env: &BookingEnvironment) -> Effects {
        let missing = state.missing_steps();
        if !missing.is_empty() {
            return smallvec![feedback(BookingAction::BookingFailed(
                BookingError::IncompleteFlow { missing }
            ))];
        }

        let (Some(date_time), Some(guest_info), Some(service_details)) = (
            state.date_time.as_ref(),
            state.guest_info.as_ref(),
            state.service_details.as_ref(),
        ) else {
            return smallvec![feedback(BookingAction::BookingFailed(
                BookingError::IncompleteFlow {
                    missing: state.missing_steps(),
                }
            ))];
        };

        if !date_time.is_available {
            return smallvec![feedback(BookingAction::BookingFailed(
                BookingError::SlotUnavailable
            ))];
        }

        let data = CreateReservationData {
            venue_id: state.venue_id.clone(),
            service_id: service_details
                .service_id
                .clone()
                .unwrap_or_else(|| state.service_id.clone()),
            date: date_time.date,
            time: date_time.time,
            duration_minutes: date_time.duration_minutes,
            guests: guest_info.number_of_guests,
            guest_name: guest_info.guest_name.clone(),
            guest_email: guest_info.guest_email.clone(),
            guest_phone: guest_info.guest_phone.clone(),
            special_requests: guest_info.special_requests.clone(),
        };

        state.submitting = true;
        state.last_error = None;

        let repository = env.reservations.clone();

        tracing::info!(
            venue_id = %data.venue_id,
            guests = data.guests,
            "submitting reservation"
        );

        smallvec![Effect::Future(Box::pin(async move {
            match repository.create(data).await {
                Ok(reservation) => Some(BookingAction::ReservationCreated(reservation)),
                Err(error) => {
                    tracing::warn!(error = %error, "reservation creation failed");
                    Some(BookingAction::BookingFailed(BookingError::SubmissionFailed(
                        error.to_string(),
                    )))
                },
            }
        }))]
    }

    /// The backend created the reservation: synthesize the confirmation,
    /// make the flow terminal, and dispatch best-effort notifications.
    fn reservation_created(
        state: &mut BookingFlowState,
        reservation: Reservation,
        env: &BookingEnvironment,
    ) -> Effects {
        state.submitting = false;

        let Some(guest_info) = state.guest_info.as_ref() else {
            // Unreachable through CompleteBooking; guard anyway
            state.last_error = Some(BookingError::SubmissionFailed(
                "reservation created without guest info".to_string(),
            ));
            return smallvec![];
        };

        let confirmation = build_confirmation(&reservation, guest_info, env.clock.now());

        state.confirmation = Some(confirmation.clone());
        state.current_step = BookingStep::Confirmation;
        state.recompute_can_proceed();
        state.last_error = None;

        tracing::info!(
            reservation_id = %reservation.id,
            confirmation_number = %confirmation.confirmation_number,
            requires_approval = confirmation.requires_approval,
            "booking confirmed"
        );

        let notifications = env.notifications.clone();
        let guest_target = reservation.id.clone();
        let guest_notification: Effect<BookingAction> = Effect::Future(Box::pin(async move {
            if let Err(error) = notifications.send_confirmation(&guest_target).await {
                tracing::warn!(error = %error, "guest confirmation dispatch failed");
            }
            None
        }));

        let notifications = env.notifications.clone();
        let venue_target = reservation.id.clone();
        let venue_notification: Effect<BookingAction> = Effect::Future(Box::pin(async move {
            if let Err(error) = notifications.notify_venue_new_booking(&venue_target).await {
                tracing::warn!(error = %error, "venue notification dispatch failed");
            }
            None
        }));

        smallvec![
            Effect::Parallel(vec![guest_notification, venue_notification]),
            feedback(BookingAction::BookingConfirmed(confirmation)),
        ]
    }
}

impl Reducer for BookingFlowReducer {
    type State = BookingFlowState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        // A confirmed flow is terminal: every further command fails.
        if state.is_confirmed() && action_is_command(&action) {
            return smallvec![feedback(BookingAction::BookingFailed(
                BookingError::FlowAlreadyCompleted
            ))];
        }

        match action {
            BookingAction::SubmitDateTime(payload) => {
                Self::submit_date_time(state, payload, env)
            },
            BookingAction::SubmitGuestInfo(payload) => Self::submit_guest_info(state, payload),
            BookingAction::SubmitServiceDetails(payload) => {
                Self::submit_service_details(state, payload)
            },
            BookingAction::SubmitPayment(payload) => Self::submit_payment(state, payload),
            BookingAction::GoToStep(target) => Self::go_to_step(state, target),
            BookingAction::CompleteBooking => Self::complete_booking(state, env),

            BookingAction::SlotConfirmed(mut payload) => {
                payload.is_available = true;
                state.date_time = Some(payload);
                state.checking_availability = false;
                state.complete_step(BookingStep::DateTime);
                smallvec![]
            },
            BookingAction::SlotRejected => {
                state.checking_availability = false;
                state.last_error = Some(BookingError::SlotUnavailable);
                smallvec![]
            },
            BookingAction::StepRejected { step, error } => {
                state.last_error = Some(BookingError::Validation { step, error });
                smallvec![]
            },
            BookingAction::ReservationCreated(reservation) => {
                Self::reservation_created(state, reservation, env)
            },
            BookingAction::BookingConfirmed(_) => smallvec![],
            BookingAction::BookingFailed(error) => {
                state.checking_availability = false;
                state.submitting = false;
                state.last_error = Some(error);
                smallvec![]
            },
        }
    }
}

/// Commands originate from the UI layer; events are effect feedback.
const fn action_is_command(action: &BookingAction) -> bool {
    matches!(
        action,
        BookingAction::SubmitDateTime(_)
            | BookingAction::SubmitGuestInfo(_)
            | BookingAction::SubmitServiceDetails(_)
            | BookingAction::SubmitPayment(_)
            | BookingAction::GoToStep(_)
            | BookingAction::CompleteBooking
    )
}
