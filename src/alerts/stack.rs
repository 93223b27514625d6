// SPDX-License-Identifier: MPL-2.0
//! Runtime-driven alert stack.
//!
//! `AlertStack` wraps an [`AlertQueue`] behind a mutex and drives its single
//! eviction timer as a tokio task. Every mutation publishes the current
//! content (oldest first) on a `watch` channel for renderers to consume.
//!
//! Timer tasks only hold a weak reference to the stack and re-check their
//! [`Epoch`] under the lock before acting, so a `clear()` that wins the lock
//! always beats a timer waking at the same instant.

use super::queue::{AlertQueue, Epoch, Expiry, Phase};
use crate::domain::alert::StackSettings;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Commands dispatched to a stack by external controllers.
#[derive(Debug, Clone)]
pub enum Command<T> {
    /// Push a new alert.
    Insert(T),
    /// Dismiss every alert.
    Clear,
}

/// Handle to a bounded, self-draining alert stack.
///
/// Clones share the same stack. The pending timer is aborted once the last
/// handle is dropped.
pub struct AlertStack<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    updates: watch::Sender<Vec<T>>,
    runtime: Handle,
}

struct State<T> {
    queue: AlertQueue<T>,
    timer: Option<JoinHandle<()>>,
}

impl<T> Clone for AlertStack<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
    }
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Shared<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn publish(&self, queue: &AlertQueue<T>) {
        self.updates.send_replace(queue.snapshot());
    }

    fn arm(self: &Arc<Self>, state: &mut State<T>, epoch: Epoch) {
        let deadline = Instant::now() + state.queue.settings().living_time().as_duration();
        let weak = Arc::downgrade(self);
        let timer = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(shared) = weak.upgrade() {
                shared.expire(epoch);
            }
        });
        tracing::debug!(epoch = epoch.value(), "eviction timer armed");
        // Replacing a finished or currently firing handle only detaches it.
        state.timer = Some(timer);
    }

    fn expire(self: &Arc<Self>, epoch: Epoch) {
        let mut state = self.lock();
        match state.queue.expire(epoch) {
            Expiry::Stale => {
                tracing::debug!(epoch = epoch.value(), "ignoring cancelled timer");
            }
            Expiry::Evicted { evicted, rearm } => {
                tracing::debug!(
                    epoch = epoch.value(),
                    seq = evicted.seq,
                    age = ?evicted.inserted_at.elapsed(),
                    remaining = state.queue.len(),
                    "oldest alert expired"
                );
                match rearm {
                    Some(next) => self.arm(&mut state, next),
                    None => state.timer = None,
                }
                self.publish(&state.queue);
            }
        }
    }
}

impl<T> AlertStack<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an empty stack driven by the current tokio runtime.
    ///
    /// Fails with [`Error::Runtime`] outside a runtime context.
    pub fn new(settings: StackSettings) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| Error::Runtime(e.to_string()))?;
        Ok(Self::with_handle(settings, runtime))
    }

    /// Creates an empty stack whose timer runs on `runtime`.
    #[must_use]
    pub fn with_handle(settings: StackSettings, runtime: Handle) -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    queue: AlertQueue::new(settings),
                    timer: None,
                }),
                updates,
                runtime,
            }),
        }
    }

    /// Pushes an alert, dropping the oldest one if the stack is full.
    pub fn insert(&self, payload: T) {
        let mut state = self.shared.lock();
        let insertion = state.queue.insert(payload);
        if insertion.overflowed.is_some() {
            tracing::debug!(len = state.queue.len(), "oldest alert dropped on overflow");
        }
        if let Some(epoch) = insertion.arm {
            self.shared.arm(&mut state, epoch);
        }
        self.shared.publish(&state.queue);
    }

    /// Dismisses every alert and cancels the pending eviction.
    pub fn clear(&self) {
        let mut state = self.shared.lock();
        if state.queue.phase() == Phase::EmptyIdle {
            return;
        }
        let cancelled = state.queue.clear();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        tracing::debug!(cancelled = ?cancelled.map(Epoch::value), "alerts cleared");
        self.shared.publish(&state.queue);
    }

    /// Applies a dispatched command.
    pub fn handle_command(&self, command: Command<T>) {
        match command {
            Command::Insert(payload) => self.insert(payload),
            Command::Clear => self.clear(),
        }
    }

    /// Applies commands until every sender is dropped.
    pub async fn run(&self, mut commands: mpsc::Receiver<Command<T>>) {
        while let Some(command) = commands.recv().await {
            self.handle_command(command);
        }
    }

    /// Subscribes to the stack content.
    ///
    /// The receiver sees the content oldest first, after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.shared.updates.subscribe()
    }

    /// Returns the current content, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.shared.lock().queue.snapshot()
    }
}

impl<T> AlertStack<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.lock().queue.is_empty()
    }

    /// Returns whether the eviction timer is armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.shared.lock().queue.is_armed()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.lock().queue.phase()
    }

    #[must_use]
    pub fn settings(&self) -> StackSettings {
        self.shared.lock().queue.settings()
    }
}

impl<T> fmt::Debug for AlertStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("AlertStack")
            .field("len", &state.queue.len())
            .field("armed", &state.queue.armed())
            .field("settings", &state.queue.settings())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings(max_len: usize, secs: u64) -> StackSettings {
        StackSettings::try_from_raw(max_len, Duration::from_secs(secs)).unwrap()
    }

    #[test]
    fn new_outside_runtime_fails() {
        let result = AlertStack::<u32>::new(settings(3, 5));
        assert!(matches!(result, Err(Error::Runtime(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn insert_arms_single_timer() {
        let stack = AlertStack::new(settings(3, 5)).unwrap();
        assert_eq!(stack.phase(), Phase::EmptyIdle);
        assert_eq!(stack.settings(), settings(3, 5));

        stack.insert(1);
        stack.insert(2);
        assert_eq!(stack.phase(), Phase::NonEmptyArmed);
        assert_eq!(stack.snapshot(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn subscriber_sees_every_mutation() {
        let stack = AlertStack::new(settings(2, 5)).unwrap();
        let mut rx = stack.subscribe();

        stack.insert("a");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), vec!["a"]);

        stack.insert("b");
        stack.insert("c");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), vec!["b", "c"]);

        // Timer-driven eviction is published too.
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), vec!["c"]);

        stack.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_on_empty_stack_publishes_nothing() {
        let stack = AlertStack::<u8>::new(settings(2, 5)).unwrap();
        let rx = stack.subscribe();

        stack.clear();
        assert!(!rx.has_changed().unwrap());
        assert_eq!(stack.phase(), Phase::EmptyIdle);
    }

    #[tokio::test(start_paused = true)]
    async fn handle_command_dispatches() {
        let stack = AlertStack::new(settings(2, 5)).unwrap();

        stack.handle_command(Command::Insert(7));
        assert_eq!(stack.snapshot(), vec![7]);

        stack.handle_command(Command::Clear);
        assert!(stack.is_empty());
        assert!(!stack.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn run_applies_commands_until_senders_drop() {
        let stack = AlertStack::new(settings(3, 5)).unwrap();
        let (tx, rx) = mpsc::channel(8);

        tx.send(Command::Insert(1)).await.unwrap();
        tx.send(Command::Insert(2)).await.unwrap();
        tx.send(Command::Clear).await.unwrap();
        tx.send(Command::Insert(3)).await.unwrap();
        drop(tx);

        stack.run(rx).await;
        assert_eq!(stack.snapshot(), vec![3]);
        assert!(stack.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_last_handle_closes_channel() {
        let stack = AlertStack::new(settings(2, 5)).unwrap();
        let mut rx = stack.subscribe();
        stack.insert(1);
        let _ = rx.borrow_and_update();

        let clone = stack.clone();
        drop(stack);
        assert_eq!(clone.len(), 1);
        drop(clone);

        assert!(rx.changed().await.is_err());
    }
}
