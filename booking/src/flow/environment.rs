//! Booking flow environment.

use crate::repository::{NotificationService, ReservationRepository};
use reservapp_core::environment::Clock;
use std::sync::Arc;

/// Injected dependencies for the booking flow reducer.
///
/// Everything the reducer's effects touch lives here as a trait object,
/// so tests swap in fixed clocks and scripted collaborators without
/// changing the reducer.
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Time source (fixed in tests)
    pub clock: Arc<dyn Clock>,
    /// Reservation backend
    pub reservations: Arc<dyn ReservationRepository>,
    /// Best-effort notification dispatch
    pub notifications: Arc<dyn NotificationService>,
}

impl BookingEnvironment {
    /// Assemble an environment from its collaborators.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        reservations: Arc<dyn ReservationRepository>,
        notifications: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            clock,
            reservations,
            notifications,
        }
    }
}
