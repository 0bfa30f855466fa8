//! # ReservApp Core
//!
//! Core traits and types for the ReservApp booking flow architecture.
//!
//! The booking flow is built on a single pattern: pure business logic in a
//! [`reducer::Reducer`], side effects described (not executed) as
//! [`effect::Effect`] values, and external dependencies injected through an
//! environment of trait objects.
//!
//! ## Core Concepts
//!
//! - **State**: the in-memory record of one in-progress booking attempt
//! - **Action**: all possible inputs to a reducer (commands from the UI
//!   layer, events fed back by effects)
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: side effect descriptions, executed by the store runtime
//! - **Environment**: injected dependencies (clock, repositories) via traits
//!
//! ## Example
//!
//! ```ignore
//! use reservapp_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! struct FlowReducer;
//!
//! impl Reducer for FlowReducer {
//!     type State = FlowState;
//!     type Action = FlowAction;
//!     type Environment = FlowEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut FlowState,
//!         action: FlowAction,
//!         env: &FlowEnvironment,
//!     ) -> SmallVec<[Effect<FlowAction>; 4]> {
//!         match action {
//!             FlowAction::SubmitGuestInfo { payload } => {
//!                 // validate, mutate state, describe effects
//!                 smallvec![Effect::None]
//!             }
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types so domain crates need a single import path.
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - the core trait for business logic.
///
/// Reducers are deterministic: the same state, action, and environment
/// always produce the same state mutation and effect descriptions. All
/// I/O lives behind the environment and inside effects.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic.
    ///
    /// # Type Parameters
    ///
    /// - `State`: the domain state this reducer operates on
    /// - `Action`: the action type this reducer processes
    /// - `Environment`: the injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects.
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place (only on success)
        /// 3. Returns effect descriptions to be executed by the runtime
        ///
        /// Most actions produce between zero and four effects, so the
        /// return type is a `SmallVec` that stays on the stack.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions.
///
/// Effects describe side effects to be performed by the store runtime.
/// They are values, not execution: a reducer returning an
/// [`effect::Effect::Future`] has not touched the network yet.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed.
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the store
    /// runtime. Futures that resolve to `Some(action)` feed that action
    /// back into the reducer.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: the action type that effects can produce (feedback loop)
    #[allow(missing_docs)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation.
        ///
        /// Returns `Option<Action>` - if `Some`, the action is fed back
        /// into the reducer.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }
    }
}

/// Environment module - dependency injection traits.
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter of the reducer. The booking domain adds
/// its own collaborator traits (reservation repository, notification
/// service) on top of the [`environment::Clock`] defined here.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability.
    ///
    /// Production uses [`SystemClock`]; tests use a fixed clock so that
    /// derived values (confirmation numbers, estimated confirmation
    /// times) are deterministic.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// System clock - returns the actual current time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
