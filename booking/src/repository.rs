//! Collaborator contracts for the booking flow.
//!
//! The flow core only talks to two external collaborators, both
//! network-backed on the real platform: the reservation repository and
//! the notification service. Their contracts live here as async traits;
//! the reducer takes them as `Arc<dyn _>` environment dependencies so
//! tests and the demo binary can substitute in-memory implementations.

use crate::types::{CreateReservationData, Reservation, ReservationId, ServiceId, VenueId};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use std::collections::HashSet;
use std::sync::Mutex;

/// Failure of a network-backed collaborator call.
///
/// The core does not retry these; a failed availability check or
/// creation call must be retried by the caller re-invoking the same
/// operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The call never reached the backend, or timed out
    #[error("network error: {0}")]
    Network(String),

    /// The backend reached a decision and said no
    #[error("backend rejected the request: {0}")]
    Rejected(String),
}

/// Reservation repository contract (external, network-backed).
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Check whether the venue/service/date/time slot is still bookable.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the backend cannot be reached or
    /// rejects the query.
    async fn check_availability(
        &self,
        data: &AvailabilityQuery,
    ) -> Result<bool, RepositoryError>;

    /// Create a reservation from a fully validated flow.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the backend cannot be reached or
    /// rejects the creation.
    async fn create(&self, data: CreateReservationData) -> Result<Reservation, RepositoryError>;
}

/// Parameters of an availability check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailabilityQuery {
    /// Venue to check
    pub venue_id: VenueId,
    /// Service to check
    pub service_id: ServiceId,
    /// Requested date
    pub date: NaiveDate,
    /// Requested time of day
    pub time: NaiveTime,
}

/// Notification service contract (external, network-backed, best-effort).
///
/// Failures from this collaborator are logged by the reducer's effects
/// and never surfaced as booking failures.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Send the guest their confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when dispatch fails; callers treat
    /// this as best-effort.
    async fn send_confirmation(&self, reservation_id: &ReservationId)
        -> Result<(), RepositoryError>;

    /// Tell the venue about the new booking.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when dispatch fails; callers treat
    /// this as best-effort.
    async fn notify_venue_new_booking(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<(), RepositoryError>;
}

// ============================================================================
// In-memory implementations (tests, demo binary)
// ============================================================================

/// In-memory reservation repository with scriptable behavior.
///
/// Simulates the reservation backend for tests and the demo binary:
/// availability can be toggled per instance, creation failures can be
/// injected, and every created reservation is recorded for inspection.
pub struct InMemoryReservationRepository {
    available: Mutex<bool>,
    fail_create: Mutex<Option<RepositoryError>>,
    fail_availability: Mutex<Option<RepositoryError>>,
    created: Mutex<Vec<CreateReservationData>>,
}

impl InMemoryReservationRepository {
    /// Create a repository whose slots are all available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: Mutex::new(true),
            fail_create: Mutex::new(None),
            fail_availability: Mutex::new(None),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Script the availability answer for subsequent checks.
    pub fn set_available(&self, available: bool) {
        if let Ok(mut guard) = self.available.lock() {
            *guard = available;
        }
    }

    /// Make subsequent `create` calls fail with the given error.
    pub fn fail_create_with(&self, error: RepositoryError) {
        if let Ok(mut guard) = self.fail_create.lock() {
            *guard = Some(error);
        }
    }

    /// Make subsequent availability checks fail with the given error.
    pub fn fail_availability_with(&self, error: RepositoryError) {
        if let Ok(mut guard) = self.fail_availability.lock() {
            *guard = Some(error);
        }
    }

    /// Reservations created so far, in creation order.
    #[must_use]
    pub fn created(&self) -> Vec<CreateReservationData> {
        self.created.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl Default for InMemoryReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn check_availability(
        &self,
        _data: &AvailabilityQuery,
    ) -> Result<bool, RepositoryError> {
        if let Ok(guard) = self.fail_availability.lock() {
            if let Some(error) = guard.clone() {
                return Err(error);
            }
        }
        Ok(self.available.lock().map(|g| *g).unwrap_or(false))
    }

    async fn create(&self, data: CreateReservationData) -> Result<Reservation, RepositoryError> {
        if let Ok(guard) = self.fail_create.lock() {
            if let Some(error) = guard.clone() {
                return Err(error);
            }
        }

        let reservation = Reservation {
            id: ReservationId::generate(),
            venue_id: data.venue_id.clone(),
            service_id: data.service_id.clone(),
            date: data.date,
            time: data.time,
            status: crate::types::ReservationStatus::Pending,
            created_at: Utc::now(),
        };

        if let Ok(mut guard) = self.created.lock() {
            guard.push(data);
        }

        Ok(reservation)
    }
}

/// A dispatched notification, as recorded by
/// [`RecordingNotificationService`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NotificationRecord {
    /// Guest confirmation for the given reservation
    GuestConfirmation(ReservationId),
    /// Venue heads-up for the given reservation
    VenueNewBooking(ReservationId),
}

/// Notification service that records dispatches instead of sending them.
///
/// Failure injection covers the "confirmation email could not be queued"
/// scenario: a booking must still succeed when this service errors.
pub struct RecordingNotificationService {
    sent: Mutex<HashSet<NotificationRecord>>,
    fail: Mutex<bool>,
}

impl RecordingNotificationService {
    /// Create a service that records every dispatch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(HashSet::new()),
            fail: Mutex::new(false),
        }
    }

    /// Make all subsequent dispatches fail.
    pub fn fail_all(&self) {
        if let Ok(mut guard) = self.fail.lock() {
            *guard = true;
        }
    }

    /// Notifications dispatched so far.
    #[must_use]
    pub fn sent(&self) -> HashSet<NotificationRecord> {
        self.sent.lock().map(|g| g.clone()).unwrap_or_default()
    }

    fn record(&self, record: NotificationRecord) -> Result<(), RepositoryError> {
        if self.fail.lock().map(|g| *g).unwrap_or(false) {
            return Err(RepositoryError::Network(
                "notification dispatch failed".to_string(),
            ));
        }
        if let Ok(mut guard) = self.sent.lock() {
            guard.insert(record);
        }
        Ok(())
    }
}

impl Default for RecordingNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for RecordingNotificationService {
    async fn send_confirmation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<(), RepositoryError> {
        self.record(NotificationRecord::GuestConfirmation(reservation_id.clone()))
    }

    async fn notify_venue_new_booking(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<(), RepositoryError> {
        self.record(NotificationRecord::VenueNewBooking(reservation_id.clone()))
    }
}
