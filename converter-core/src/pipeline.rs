//! Debounced, switch-latest conversion pipeline.
//!
//! Each `trigger()` bumps a generation counter and replaces the running task.
//! A task only touches state while its generation is still the newest one,
//! and that check runs inside the same store update that applies the
//! result, so a superseded outcome is never written even if the aborted
//! task got further than expected.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use converter_types::{ConversionError, ConverterState, CurrencyApi, round_to_cents};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::store::{StateStore, lock};

/// Where the pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    Idle,
    Debouncing,
    InFlight,
}

struct Control {
    generation: u64,
    phase: PipelinePhase,
    task: Option<JoinHandle<()>>,
    closed: bool,
}

struct Inner<A: CurrencyApi> {
    api: Arc<A>,
    store: Arc<StateStore>,
    debounce: Duration,
    control: Mutex<Control>,
}

impl<A: CurrencyApi> Inner<A> {
    fn trigger(self: &Arc<Self>) {
        let mut control = lock(&self.control);
        if control.closed {
            return;
        }
        control.generation += 1;
        control.phase = PipelinePhase::Debouncing;
        if let Some(task) = control.task.take() {
            task.abort();
        }
        let generation = control.generation;
        control.task = Some(tokio::spawn(run(Arc::clone(self), generation)));
    }

    fn shutdown(&self) {
        let mut control = lock(&self.control);
        if control.closed {
            return;
        }
        control.closed = true;
        control.generation += 1;
        control.phase = PipelinePhase::Idle;
        if let Some(task) = control.task.take() {
            task.abort();
        }
        debug!("conversion pipeline shut down");
    }

    /// Moves to `phase` and applies `f` to state, but only if `generation`
    /// is still current. Returns whether it was.
    fn advance(
        &self,
        generation: u64,
        phase: PipelinePhase,
        f: impl FnOnce(&mut ConverterState),
    ) -> bool {
        self.store.update_if(|state| {
            {
                let mut control = lock(&self.control);
                if control.closed || control.generation != generation {
                    return false;
                }
                control.phase = phase;
            }
            f(state);
            true
        })
    }
}

async fn run<A: CurrencyApi>(inner: Arc<Inner<A>>, generation: u64) {
    sleep(inner.debounce).await;

    let mut request = None;
    inner.advance(generation, PipelinePhase::InFlight, |state| {
        state.is_converting = true;
        state.error_message.clear();
        request = Some(state.request());
    });
    let Some(request) = request else {
        return;
    };

    if !request.is_valid() {
        debug!(
            from = %request.from,
            to = %request.to,
            amount = request.amount,
            "skipping invalid conversion request"
        );
        inner.advance(generation, PipelinePhase::Idle, |state| {
            state.is_converting = false;
            state.to_amount = None;
        });
        return;
    }

    let outcome = match inner.api.convert(&request).await {
        Ok(Some(value)) => Ok(round_to_cents(value)),
        Ok(None) => Err(ConversionError::NoResult),
        Err(e) => {
            warn!(error = %e, "conversion request failed");
            Err(ConversionError::from(e))
        }
    };

    let applied = inner.advance(generation, PipelinePhase::Idle, |state| {
        state.is_converting = false;
        match outcome {
            Ok(value) => {
                state.to_amount = Some(value);
                state.error_message.clear();
            }
            Err(err) => {
                state.to_amount = None;
                state.error_message = err.to_string();
            }
        }
    });
    if !applied {
        debug!(generation, "discarding superseded conversion result");
    }
}

/// Owner of the conversion task. Dropping it cancels pending work.
pub struct ConversionPipeline<A: CurrencyApi> {
    inner: Arc<Inner<A>>,
}

/// Cloneable handle that can only trigger; inert once the pipeline is gone.
pub struct TriggerHandle<A: CurrencyApi> {
    inner: Arc<Inner<A>>,
}

impl<A: CurrencyApi> Clone for TriggerHandle<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: CurrencyApi> TriggerHandle<A> {
    pub fn trigger(&self) {
        self.inner.trigger();
    }
}

impl<A: CurrencyApi> ConversionPipeline<A> {
    /// Must be called inside a tokio runtime; triggers spawn tasks.
    pub fn new(api: Arc<A>, store: Arc<StateStore>, debounce: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                store,
                debounce,
                control: Mutex::new(Control {
                    generation: 0,
                    phase: PipelinePhase::Idle,
                    task: None,
                    closed: false,
                }),
            }),
        }
    }

    /// Restarts the debounce; whatever was pending or in flight is superseded.
    pub fn trigger(&self) {
        self.inner.trigger();
    }

    pub fn handle(&self) -> TriggerHandle<A> {
        TriggerHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn phase(&self) -> PipelinePhase {
        lock(&self.inner.control).phase
    }

    /// Cancels pending work; later triggers are ignored.
    pub fn shutdown(&self) {
        self.inner.shutdown();
    }
}

impl<A: CurrencyApi> Drop for ConversionPipeline<A> {
    fn drop(&mut self) {
        self.inner.shutdown();
    }
}
