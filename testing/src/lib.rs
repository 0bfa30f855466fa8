//! # ReservApp Testing
//!
//! Testing utilities and helpers for booking flow reducers.
//!
//! This crate provides:
//! - Mock implementations of environment traits ([`mocks::FixedClock`])
//! - A fluent Given-When-Then API for reducer tests ([`ReducerTest`])
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use reservapp_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(BookingFlowReducer::new())
//!     .with_env(test_environment())
//!     .given_state(BookingFlowState::new(venue_id, service_id))
//!     .when_action(BookingAction::SubmitGuestInfo { payload })
//!     .then_state(|state| {
//!         assert!(state.completed_steps.contains(&BookingStep::GuestInfo));
//!     })
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use reservapp_core::environment::Clock;


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making derived values (confirmation
    /// numbers, estimated confirmation times) reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use reservapp_testing::mocks::FixedClock;
    /// use reservapp_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which should
    /// never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock};
