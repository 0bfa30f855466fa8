//! Booking flow actions.
//!
//! Commands arrive from the UI layer; events are fed back into the
//! reducer by executed effects. Store observers on the broadcast channel
//! see both, which is how integration tests (and the demo binary) wait
//! for a flow to settle.

use crate::error::{BookingError, ValidationError};
use crate::types::{
    BookingConfirmation, BookingDateTime, BookingGuestInfo, BookingPaymentInfo,
    BookingServiceDetails, BookingStep, Reservation,
};
use serde::{Deserialize, Serialize};

/// All inputs to the booking flow reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingAction {
    // ------------------------------------------------------------------
    // Commands (UI layer)
    // ------------------------------------------------------------------
    /// Submit a date/time selection; triggers the availability gate
    SubmitDateTime(BookingDateTime),
    /// Submit guest contact details and party size
    SubmitGuestInfo(BookingGuestInfo),
    /// Submit the service selection and pricing
    SubmitServiceDetails(BookingServiceDetails),
    /// Submit payment amounts and method
    SubmitPayment(BookingPaymentInfo),
    /// Navigate to another step (backward always; forward only when
    /// every earlier step is complete)
    GoToStep(BookingStep),
    /// Submit the completed flow to the reservation backend
    CompleteBooking,

    // ------------------------------------------------------------------
    // Events (effect feedback)
    // ------------------------------------------------------------------
    /// The availability gate confirmed the slot; carries the payload to
    /// store (the gate owns `is_available`)
    SlotConfirmed(BookingDateTime),
    /// The availability gate rejected the slot, or the check failed
    SlotRejected,
    /// A step payload failed validation
    StepRejected {
        /// The step whose payload was rejected
        step: BookingStep,
        /// The rule that rejected it
        error: ValidationError,
    },
    /// The backend created the reservation
    ReservationCreated(Reservation),
    /// The flow settled successfully; terminal
    BookingConfirmed(BookingConfirmation),
    /// The flow could not settle; carries the reason
    BookingFailed(BookingError),
}

impl BookingAction {
    /// Whether this action is one of the two terminal outcomes a caller
    /// waits for after `CompleteBooking`.
    #[must_use]
    pub const fn is_submission_outcome(&self) -> bool {
        matches!(self, Self::BookingConfirmed(_) | Self::BookingFailed(_))
    }

    /// Whether this action settles an in-flight availability check.
    #[must_use]
    pub const fn is_availability_outcome(&self) -> bool {
        matches!(self, Self::SlotConfirmed(_) | Self::SlotRejected)
    }
}
