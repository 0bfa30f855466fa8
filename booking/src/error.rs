//! Error taxonomy for the booking flow.
//!
//! All errors here are recoverable from the caller's perspective: a
//! validation failure is surfaced for correction, an unavailable slot is
//! surfaced for reselection, and a submission failure is surfaced for a
//! caller-driven retry. None of them are fatal to the process and none of
//! them mutate flow state.

use crate::types::BookingStep;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A per-step validation failure.
///
/// Validators are total: any input produces either `Ok(())` or one of
/// these tagged reasons, never a panic. Each variant names the field at
/// fault so the UI can highlight it.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// Guest name is blank after trimming
    #[error("guest name must not be empty")]
    EmptyName,

    /// Guest email does not match the email grammar
    #[error("guest email {0:?} is not a valid email address")]
    InvalidEmail(String),

    /// Party size outside the accepted range
    #[error("number of guests {0} is out of range (1..=20)")]
    GuestCountOutOfRange(u32),

    /// Service details submitted without a service
    #[error("service id is missing")]
    MissingServiceId,

    /// Total price is not positive
    #[error("total price must be greater than zero")]
    InvalidPricing,

    /// Final payment amount is not positive
    #[error("final amount must be greater than zero")]
    InvalidAmount,

    /// Neither a payment method nor a payment intent was provided
    #[error("either a payment method or a payment intent is required")]
    MissingPaymentMethod,

    /// Both a payment method and a payment intent were provided
    #[error("payment method and payment intent are mutually exclusive")]
    AmbiguousPaymentMethod,

    /// Duration must be a positive number of minutes
    #[error("duration of {0} minutes is invalid")]
    InvalidDuration(u32),

    /// Timezone is blank
    #[error("timezone must not be empty")]
    MissingTimezone,
}

/// A booking flow failure.
///
/// `SlotUnavailable` stays distinct from `SubmissionFailed` so the UI can
/// tell "your slot just became unavailable, please reselect" apart from
/// "something went wrong, try again".
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BookingError {
    /// A step payload failed validation; the flow did not advance
    #[error("validation failed for step {step}: {error}")]
    Validation {
        /// The step whose payload was rejected
        step: BookingStep,
        /// The rule that rejected it
        error: ValidationError,
    },

    /// The requested slot is no longer available (availability gate or
    /// defensive re-check at submission)
    #[error("the requested time slot is no longer available")]
    SlotUnavailable,

    /// `CompleteBooking` was requested before every required step was done
    #[error("booking flow is incomplete; missing steps: {}", format_steps(.missing))]
    IncompleteFlow {
        /// Required steps absent from the completed set, in order
        missing: Vec<BookingStep>,
    },

    /// The backend rejected or failed the reservation creation call
    #[error("reservation submission failed: {0}")]
    SubmissionFailed(String),

    /// The flow already produced a confirmation; start a new flow instead
    #[error("booking flow already completed")]
    FlowAlreadyCompleted,
}

fn format_steps(steps: &[BookingStep]) -> String {
    steps
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
