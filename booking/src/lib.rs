//! # ReservApp Booking
//!
//! The booking flow sequencer: a five-step validated workflow that takes
//! a guest from slot selection to a confirmed reservation.
//!
//! ## Steps
//!
//! 1. **dateTime** — date, time, duration; gated by an async
//!    availability check against the live reservation backend
//! 2. **guestInfo** — contact details and party size
//! 3. **serviceDetails** — service selection, add-ons, pricing
//! 4. **payment** — amounts and payment method
//! 5. **confirmation** — terminal; reached only through a successful
//!    submission
//!
//! ## Architecture
//!
//! The flow is a pure [`flow::BookingFlowReducer`] over
//! [`flow::BookingFlowState`]: commands are validated synchronously,
//! collaborator calls (availability gate, reservation creation,
//! notifications) are described as effects and executed by the store,
//! and their outcomes come back in as event actions. Failed transitions
//! leave the flow state unchanged apart from `last_error`.
//!
//! ## Example
//!
//! ```ignore
//! use reservapp_booking::flow::{
//!     BookingAction, BookingEnvironment, BookingFlowReducer, BookingFlowState,
//! };
//! use reservapp_runtime::Store;
//!
//! let store = Store::new(
//!     BookingFlowState::new(venue_id, service_id),
//!     BookingFlowReducer::new(),
//!     environment,
//! );
//!
//! let outcome = store
//!     .send_and_wait_for(
//!         BookingAction::CompleteBooking,
//!         |action| action.is_submission_outcome(),
//!         Duration::from_secs(5),
//!     )
//!     .await?;
//! ```

pub mod confirmation;
pub mod error;
pub mod flow;
pub mod repository;
pub mod types;
pub mod validate;

pub use error::{BookingError, ValidationError};
pub use flow::{BookingAction, BookingEnvironment, BookingFlowReducer, BookingFlowState};
pub use types::{
    BookingConfirmation, BookingDateTime, BookingGuestInfo, BookingPaymentInfo,
    BookingServiceDetails, BookingStep, Money, Reservation, ReservationId, ServiceId, VenueId,
};
