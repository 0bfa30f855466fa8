//! The booking flow sequencer.
//!
//! A five-step validated workflow: date/time, guest info, service
//! details, payment, confirmation. Steps are validated on submission,
//! the date/time step passes through an async availability gate, and
//! completion submits the assembled reservation to the backend.
//!
//! The flow is a pure [`BookingFlowReducer`] over [`BookingFlowState`]
//! and [`BookingAction`], with collaborators injected through
//! [`BookingEnvironment`]. Run it inside a
//! [`Store`](reservapp_runtime::Store) to get effect execution and
//! action feedback.

mod actions;
mod environment;
mod reducer;
mod state;

pub use actions::BookingAction;
pub use environment::BookingEnvironment;
pub use reducer::BookingFlowReducer;
pub use state::BookingFlowState;
