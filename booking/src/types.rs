//! Domain types for the ReservApp booking flow.
//!
//! This module contains the value objects and entities shared by the flow
//! reducer, the step validators, and the collaborator contracts: venue and
//! service identifiers, the five-step sequence, the per-step payloads, and
//! the confirmation record produced at submission time.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a venue
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueId(String);

impl VenueId {
    /// Create a `VenueId` from a backend identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a bookable service offered by a venue
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(String);

impl ServiceId {
    /// Create a `ServiceId` from a backend identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a reservation, assigned by the backend
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(String);

impl ReservationId {
    /// Create a `ReservationId` from a backend identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier (used by in-memory backends)
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money Value Object (cents-based to avoid floating point errors)
// ============================================================================

/// Represents money in cents to avoid floating-point arithmetic errors
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` value from whole currency units
    ///
    /// # Panics
    ///
    /// Panics if the conversion would overflow (`units * 100 > u64::MAX`).
    #[must_use]
    #[allow(clippy::panic)]
    pub const fn from_units(units: u64) -> Self {
        match units.checked_mul(100) {
            Some(cents) => Self(cents),
            None => panic!("Money::from_units overflow"),
        }
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, saturating at `u64::MAX`
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts an amount, saturating at zero
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Booking steps
// ============================================================================

/// One stage of the fixed five-stage booking sequence.
///
/// The order is total and fixed: date/time, guest info, service details,
/// payment, confirmation. `Confirmation` is terminal and is only reached
/// through a successful submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingStep {
    /// Date, time, and duration selection
    DateTime,
    /// Guest contact details and party size
    GuestInfo,
    /// Service selection with add-ons and pricing
    ServiceDetails,
    /// Payment method and amounts
    Payment,
    /// Terminal step, reached after the reservation is created
    Confirmation,
}

impl BookingStep {
    /// All steps in sequence order
    pub const ORDER: [Self; 5] = [
        Self::DateTime,
        Self::GuestInfo,
        Self::ServiceDetails,
        Self::Payment,
        Self::Confirmation,
    ];

    /// The four non-terminal steps that must be completed before submission
    pub const REQUIRED: [Self; 4] = [
        Self::DateTime,
        Self::GuestInfo,
        Self::ServiceDetails,
        Self::Payment,
    ];

    /// Position of this step in the fixed order
    #[must_use]
    pub fn index(self) -> usize {
        // ORDER contains every variant, so this always finds a position
        Self::ORDER
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    /// The step after this one, or `None` for the terminal step
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    /// The step before this one, or `None` for the first step
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ORDER[i])
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DateTime => "dateTime",
            Self::GuestInfo => "guestInfo",
            Self::ServiceDetails => "serviceDetails",
            Self::Payment => "payment",
            Self::Confirmation => "confirmation",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Step payloads
// ============================================================================

/// Date/time selection for a booking.
///
/// `is_available` is owned by the availability gate: submissions from the
/// UI layer are stored with it reset to `false`, and only a confirmed
/// availability check flips it to `true`. A date/time payload is not
/// complete unless `is_available` is `true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDateTime {
    /// Calendar date of the reservation
    pub date: NaiveDate,
    /// Local time of day
    pub time: NaiveTime,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// IANA timezone name of the venue (e.g. "Europe/Madrid")
    pub timezone: String,
    /// Whether the slot was confirmed available by the gate
    pub is_available: bool,
}

/// Guest contact details and party size
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingGuestInfo {
    /// Number of guests (1..=20)
    pub number_of_guests: u32,
    /// Name of the booking guest
    pub guest_name: String,
    /// Contact email address
    pub guest_email: String,
    /// Optional contact phone number
    pub guest_phone: Option<String>,
    /// Optional free-form special requests
    pub special_requests: Option<String>,
}

/// Optional add-on attached to a service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    /// Add-on identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Price of the add-on
    pub price: Money,
    /// Whether the guest selected this add-on
    pub selected: bool,
}

/// Service selection with pricing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingServiceDetails {
    /// The selected service; absent when the UI submitted an empty form
    pub service_id: Option<ServiceId>,
    /// Display name of the service
    pub service_name: String,
    /// Base price before add-ons
    pub base_price: Money,
    /// Available add-ons with selection flags
    pub add_ons: Vec<AddOn>,
    /// Total price including selected add-ons; must be positive
    pub total_price: Money,
}

/// Payment amounts and method for a booking.
///
/// Exactly one of `payment_method_id` or `payment_intent_id` must be set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPaymentInfo {
    /// Base amount before taxes and discounts
    pub amount: Money,
    /// ISO 4217 currency code
    pub currency: String,
    /// Taxes added to the amount
    pub taxes: Money,
    /// Discounts subtracted from the amount
    pub discounts: Money,
    /// Final charge; must be positive
    pub final_amount: Money,
    /// Saved payment method reference
    pub payment_method_id: Option<String>,
    /// Payment intent reference from the payment provider
    pub payment_intent_id: Option<String>,
}

// ============================================================================
// Reservation backend shapes
// ============================================================================

/// Request shape for creating a reservation at the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationData {
    /// Venue to book
    pub venue_id: VenueId,
    /// Service to book
    pub service_id: ServiceId,
    /// Reservation date
    pub date: NaiveDate,
    /// Reservation time
    pub time: NaiveTime,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Number of guests
    pub guests: u32,
    /// Guest name
    pub guest_name: String,
    /// Guest email
    pub guest_email: String,
    /// Optional guest phone
    pub guest_phone: Option<String>,
    /// Optional special requests
    pub special_requests: Option<String>,
}

/// Status of a reservation as reported by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Created, awaiting venue confirmation
    Pending,
    /// Confirmed by the venue
    Confirmed,
    /// Cancelled
    Cancelled,
}

/// A reservation record returned by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Backend-assigned identifier
    pub id: ReservationId,
    /// Venue booked
    pub venue_id: VenueId,
    /// Service booked
    pub service_id: ServiceId,
    /// Reservation date
    pub date: NaiveDate,
    /// Reservation time
    pub time: NaiveTime,
    /// Current status
    pub status: ReservationStatus,
    /// When the backend created the record
    pub created_at: DateTime<Utc>,
}

/// Confirmation record produced once, at submission time.
///
/// `confirmation_number` is human-readable and always matches
/// `RES-\d{6}-[A-Z0-9]{4}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// The backend reservation this confirms
    pub reservation_id: ReservationId,
    /// Human-readable confirmation number shown to the guest
    pub confirmation_number: String,
    /// When the venue is expected to confirm the booking
    pub estimated_confirmation_time: DateTime<Utc>,
    /// Whether the venue must manually approve the booking
    pub requires_approval: bool,
}
