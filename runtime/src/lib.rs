//! # ReservApp Runtime
//!
//! Store runtime for the ReservApp booking flow.
//!
//! This crate provides the [`Store`] that coordinates reducer execution
//! and effect handling:
//!
//! - **Store**: owns state behind a lock and serializes reducer runs
//! - **Effect executor**: runs effect descriptions in spawned tasks and
//!   feeds resulting actions back into the reducer
//! - **Action broadcast**: lets callers observe actions produced by
//!   effects, enabling request/response patterns over the feedback loop
//!
//! ## Example
//!
//! ```ignore
//! use reservapp_runtime::Store;
//!
//! let store = Store::new(initial_state, reducer, environment);
//!
//! // Send an action
//! let handle = store.send(Action::SubmitGuestInfo { payload }).await?;
//! handle.wait().await;
//!
//! // Read state
//! let step = store.state(|s| s.current_step).await;
//! ```
//!
//! Effects are fire-and-forget with respect to the store: a failed
//! effect is logged, never retried. Callers that need a retry re-send
//! the originating action, which is safe because reducers leave state
//! unchanged on failed transitions.

use reservapp_core::{effect::Effect, reducer::Reducer};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// An effect execution failed
        ///
        /// This error is logged but does not halt the store.
        /// Effects are fire-and-forget operations.
        #[error("Effect execution failed: {0}")]
        EffectFailed(String),

        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// Typically means the store is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects of one
/// action to complete. Waiting covers the effects returned by that
/// reducer run, not effects spawned transitively by feedback actions.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Start).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle and its paired tracking context.
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete.
    ///
    /// Useful for initialization in loops where a `last_handle` is
    /// needed before the first send.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Wait for all effects to complete.
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            let _ = self.completion.changed().await;
        }
    }

    /// Wait for all effects to complete with a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution.
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

impl Clone for EffectTracking {
    fn clone(&self) -> Self {
        Self {
            counter: Arc::clone(&self.counter),
            notifier: self.notifier.clone(),
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop.
///
/// Ensures the counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    /// Action broadcast channel for observing actions produced by effects.
    ///
    /// All actions produced by effects (e.g., from `Effect::Future`) are
    /// broadcast to observers. This enables request-response patterns on
    /// top of the effect feedback loop.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment.
    ///
    /// The action broadcast capacity defaults to 16; increase it with
    /// [`Store::with_broadcast_capacity`] if observers frequently lag.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        let (action_broadcast, _) = broadcast::channel(16);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
        }
    }

    /// Create a new store with a custom action broadcast capacity.
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
        }
    }

    /// Initiate graceful shutdown of the store.
    ///
    /// Sets the shutdown flag (rejecting new actions), then waits for
    /// pending effects to complete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
    /// before all pending effects complete.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("Initiating graceful shutdown");

        self.shutdown.store(true, Ordering::Release);

        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(100);

        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);

            if pending == 0 {
                tracing::info!("All effects completed, shutdown successful");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(
                    pending_effects = pending,
                    "Shutdown timeout: {} effects still running",
                    pending
                );
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Send an action to the store.
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with `(state, action, environment)`
    /// 3. Executes returned effects asynchronously
    /// 4. Effects may produce more actions (feedback loop)
    ///
    /// `send()` returns after starting effect execution, not completion;
    /// use the returned [`EffectHandle`] to wait.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is
    /// shutting down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
    where
        E: Clone,
        R: Clone,
    {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("Rejected action: store is shutting down");
            return Err(StoreError::ShutdownInProgress);
        }

        tracing::debug!("Processing action");

        let (handle, tracking) = EffectHandle::new();

        let effects = {
            let mut state = self.state.write().await;
            let span = tracing::debug_span!("reducer_execution");
            let _enter = span.enter();
            self.reducer.reduce(&mut state, action, &self.environment)
        };

        tracing::trace!("Reducer completed, executing {} effects", effects.len());
        for effect in effects {
            self.execute_effect_internal(effect, tracking.clone());
        }

        Ok(handle)
    }

    /// Send an action and wait for a matching result action.
    ///
    /// This method is designed for request-response patterns: it
    /// subscribes to the action broadcast, sends the initial action,
    /// then waits for an action matching the predicate. Only actions
    /// produced by effects are broadcast, so the predicate should match
    /// terminal feedback events.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`]: timeout expired before a matching action
    /// - [`StoreError::ChannelClosed`]: action broadcast channel closed
    /// - [`StoreError::ShutdownInProgress`]: store is shutting down
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        E: Clone,
        R: Clone,
        F: Fn(&A) -> bool,
    {
        // Subscribe BEFORE sending to avoid a race with fast effects
        let mut rx = self.action_broadcast.subscribe();

        self.send(action).await?;

        tokio::time::timeout(timeout, async {
            loop {
                match rx.recv().await {
                    Ok(action) if predicate(&action) => return Ok(action),
                    Ok(_) => {}, // Not the action we want, keep waiting
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Slow consumer; if the terminal action was dropped
                        // the timeout catches it
                        tracing::warn!(skipped, "Action observer lagged");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Subscribe to all actions produced by effects of this store.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Read current state via a closure.
    ///
    /// Access state through a closure to ensure the lock is released
    /// promptly:
    ///
    /// ```ignore
    /// let step = store.state(|s| s.current_step).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Execute an effect with tracking.
    ///
    /// **Reducer panics** propagate (fail fast); reducers should be pure
    /// functions that do not panic. **Effect failures** are logged and
    /// dropped; the [`DecrementGuard`] keeps the counter correct even on
    /// panic.
    #[allow(clippy::needless_pass_by_value)] // tracking is cloned, so pass by value is intentional
    #[tracing::instrument(skip(self, effect, tracking), name = "execute_effect")]
    fn execute_effect_internal(&self, effect: Effect<A>, tracking: EffectTracking)
    where
        E: Clone,
        R: Clone,
    {
        match effect {
            Effect::None => {
                tracing::trace!("Executing Effect::None (no-op)");
            },
            Effect::Future(fut) => {
                tracing::trace!("Executing Effect::Future");
                tracking.increment();

                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                let tracking_clone = tracking.clone();
                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking_clone);
                    let _pending_guard = pending_guard; // Decrement on drop

                    if let Some(action) = fut.await {
                        tracing::trace!("Effect::Future produced an action");

                        // Reduce first, then broadcast: an observer that
                        // sees the action can rely on state reflecting it
                        let _ = store.send(action.clone()).await;
                        let _ = store.action_broadcast.send(action);
                    } else {
                        tracing::trace!("Effect::Future completed with no action");
                    }
                });
            },
            Effect::Delay { duration, action } => {
                tracing::trace!("Executing Effect::Delay (duration: {:?})", duration);
                tracking.increment();

                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                let tracking_clone = tracking.clone();
                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking_clone);
                    let _pending_guard = pending_guard; // Decrement on drop

                    tokio::time::sleep(duration).await;

                    let _ = store.send((*action).clone()).await;
                    let _ = store.action_broadcast.send(*action);
                });
            },
            Effect::Parallel(effects) => {
                tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                for effect in effects {
                    self.execute_effect_internal(effect, tracking.clone());
                }
            },
            Effect::Sequential(effects) => {
                let effect_count = effects.len();
                tracing::trace!("Executing Effect::Sequential with {} effects", effect_count);
                tracking.increment();

                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                let tracking_clone = tracking.clone();
                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking_clone);
                    let _pending_guard = pending_guard; // Decrement on drop

                    // Execute effects one by one, waiting for each to complete
                    for (idx, effect) in effects.into_iter().enumerate() {
                        tracing::trace!("Sequential effect {} of {}", idx + 1, effect_count);

                        let (sub_tx, mut sub_rx) = watch::channel(());
                        let sub_tracking = EffectTracking {
                            counter: Arc::new(AtomicUsize::new(0)),
                            notifier: sub_tx,
                        };

                        store.execute_effect_internal(effect, sub_tracking.clone());

                        if sub_tracking.counter.load(Ordering::SeqCst) > 0 {
                            let _ = sub_rx.changed().await;
                        }
                    }
                });
            },
        }
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}
