//! Booking flow state.

use crate::error::BookingError;
use crate::types::{
    BookingConfirmation, BookingDateTime, BookingGuestInfo, BookingPaymentInfo,
    BookingServiceDetails, BookingStep, ServiceId, VenueId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The in-memory record of one booking attempt.
///
/// Invariants maintained by [`BookingFlowReducer`](super::BookingFlowReducer):
///
/// - `completed_steps` only grows during a flow; nothing removes entries.
/// - `can_proceed` is recomputed on every mutation, never stale.
/// - `confirmation` is set at most once; a populated confirmation makes
///   the flow terminal.
/// - A failed transition changes nothing except `last_error` and the
///   in-flight flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFlowState {
    /// Venue this flow was launched for
    pub venue_id: VenueId,
    /// Service this flow was launched for (used by the availability gate)
    pub service_id: ServiceId,
    /// The step the guest is currently on
    pub current_step: BookingStep,
    /// Steps whose payloads have been validated and stored
    pub completed_steps: HashSet<BookingStep>,
    /// Validated date/time payload, once the availability gate confirmed it
    pub date_time: Option<BookingDateTime>,
    /// Validated guest info payload
    pub guest_info: Option<BookingGuestInfo>,
    /// Validated service details payload
    pub service_details: Option<BookingServiceDetails>,
    /// Validated payment payload
    pub payment_info: Option<BookingPaymentInfo>,
    /// Whether the current step is complete and the guest may advance
    pub can_proceed: bool,
    /// Set while the availability gate is in flight
    pub checking_availability: bool,
    /// Set while the reservation creation call is in flight
    pub submitting: bool,
    /// Confirmation record; present only after a successful submission
    pub confirmation: Option<BookingConfirmation>,
    /// Most recent failure, cleared by the next successful transition
    pub last_error: Option<BookingError>,
}

impl BookingFlowState {
    /// Fresh flow for a venue and service, positioned on the first step.
    #[must_use]
    pub fn new(venue_id: VenueId, service_id: ServiceId) -> Self {
        Self {
            venue_id,
            service_id,
            current_step: BookingStep::DateTime,
            completed_steps: HashSet::new(),
            date_time: None,
            guest_info: None,
            service_details: None,
            payment_info: None,
            can_proceed: false,
            checking_availability: false,
            submitting: false,
            confirmation: None,
            last_error: None,
        }
    }

    /// Whether every step strictly before `target` has been completed.
    ///
    /// Forward navigation and submission are gated on this; backward
    /// navigation trivially satisfies it because `completed_steps` only
    /// grows.
    #[must_use]
    pub fn can_proceed_to(&self, target: BookingStep) -> bool {
        BookingStep::ORDER
            .iter()
            .take_while(|step| **step != target)
            .all(|step| self.completed_steps.contains(step))
    }

    /// Required steps not yet completed, in sequence order.
    #[must_use]
    pub fn missing_steps(&self) -> Vec<BookingStep> {
        BookingStep::REQUIRED
            .iter()
            .copied()
            .filter(|step| !self.completed_steps.contains(step))
            .collect()
    }

    /// Whether all four required steps are complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_steps().is_empty()
    }

    /// Whether the flow has produced a confirmation and is terminal.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmation.is_some()
    }

    /// Move `current_step` to the earliest incomplete required step.
    ///
    /// When everything is complete the flow parks on `Payment`; only a
    /// successful submission moves it to `Confirmation`.
    pub(crate) fn advance(&mut self) {
        self.current_step = BookingStep::REQUIRED
            .iter()
            .copied()
            .find(|step| !self.completed_steps.contains(step))
            .unwrap_or(BookingStep::Payment);
        self.recompute_can_proceed();
    }

    pub(crate) fn recompute_can_proceed(&mut self) {
        self.can_proceed = self.completed_steps.contains(&self.current_step)
            || self.current_step == BookingStep::Confirmation;
    }

    /// Record a step as complete and recompute derived fields.
    pub(crate) fn complete_step(&mut self, step: BookingStep) {
        self.completed_steps.insert(step);
        self.advance();
        self.last_error = None;
    }
}
