//! Observable state container.
//!
//! A `watch` channel holds the current `ConverterState`. Every mutation runs
//! under the channel's lock and subscribers see whole snapshots, so a derived
//! value computed from a snapshot is never stale relative to it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use converter_types::ConverterState;
use tokio::sync::watch;

pub struct StateStore {
    tx: watch::Sender<ConverterState>,
}

impl StateStore {
    pub fn new(initial: ConverterState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> ConverterState {
        self.tx.borrow().clone()
    }

    /// Reads from the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&ConverterState) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Receiver that is notified after every effective change.
    pub fn subscribe(&self) -> watch::Receiver<ConverterState> {
        self.tx.subscribe()
    }

    /// Applies `f` and notifies subscribers if the state actually changed.
    /// Returns whether it changed.
    pub fn update(&self, f: impl FnOnce(&mut ConverterState)) -> bool {
        self.tx.send_if_modified(|state| {
            let before = state.clone();
            f(state);
            *state != before
        })
    }

    /// Applies `f`, which decides itself whether it modified the state.
    ///
    /// `f` must leave the state untouched when it returns false.
    pub fn update_if(&self, f: impl FnOnce(&mut ConverterState) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }
}

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
