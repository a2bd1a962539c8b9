//! Converter view model.
//!
//! Owns the widget state, loads currencies through the shared cache and
//! feeds the conversion pipeline whenever the selection changes.

use std::sync::{Arc, Mutex};

use converter_types::{ConverterState, CurrencyApi};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CurrencyCache;
use crate::options::ConverterOptions;
use crate::pipeline::{ConversionPipeline, PipelinePhase, TriggerHandle};
use crate::store::{StateStore, lock};
use crate::widgets::WidgetEvent;

/// State holder behind the converter widget.
///
/// Generic over `A: CurrencyApi` so tests and the real gateway share one
/// implementation. Dropping it cancels the currency load and any pending
/// conversion; nothing writes to its state afterwards.
pub struct ConverterViewModel<A: CurrencyApi> {
    store: Arc<StateStore>,
    cache: Arc<CurrencyCache<A>>,
    pipeline: ConversionPipeline<A>,
    loader: Mutex<Option<JoinHandle<()>>>,
}

impl<A: CurrencyApi> ConverterViewModel<A> {
    /// Creates the view model and considers the initial selection for
    /// conversion. Must be called inside a tokio runtime.
    pub fn new(cache: Arc<CurrencyCache<A>>, options: ConverterOptions) -> Self {
        let store = Arc::new(StateStore::new(ConverterState::new(
            options.from_code,
            options.to_code,
            options.from_amount,
        )));
        let pipeline = ConversionPipeline::new(
            Arc::clone(cache.api()),
            Arc::clone(&store),
            options.debounce,
        );

        let vm = Self {
            store,
            cache,
            pipeline,
            loader: Mutex::new(None),
        };
        vm.consider_conversion();
        vm
    }

    /// Starts loading currencies in the background.
    pub fn init(&self) {
        let task = tokio::spawn(load_into(
            Arc::clone(&self.cache),
            Arc::clone(&self.store),
            self.pipeline.handle(),
        ));
        if let Some(previous) = lock(&self.loader).replace(task) {
            previous.abort();
        }
    }

    /// Loads currencies and waits for them to be applied.
    pub async fn load_currencies(&self) {
        load_into(
            Arc::clone(&self.cache),
            Arc::clone(&self.store),
            self.pipeline.handle(),
        )
        .await;
    }

    /// Drops the cached list and loads it again in the background.
    pub fn refresh_currencies(&self) {
        self.cache.refresh();
        self.init();
    }

    pub fn set_from(&self, code: impl Into<String>) {
        let code = code.into();
        self.mutate(|state| state.from_code = code);
    }

    pub fn set_to(&self, code: impl Into<String>) {
        let code = code.into();
        self.mutate(|state| state.to_code = code);
    }

    pub fn set_amount(&self, amount: f64) {
        self.mutate(|state| state.from_amount = amount);
    }

    /// Exchanges the selected codes. Amounts stay where they are.
    pub fn swap(&self) {
        self.mutate(|state| std::mem::swap(&mut state.from_code, &mut state.to_code));
    }

    /// Routes a widget event to the matching mutator.
    pub fn handle(&self, event: WidgetEvent) {
        match event {
            WidgetEvent::AmountChanged(amount) => self.set_amount(amount),
            WidgetEvent::FromSelected(code) => self.set_from(code),
            WidgetEvent::ToSelected(code) => self.set_to(code),
            WidgetEvent::SwapRequested => self.swap(),
        }
    }

    pub fn state(&self) -> ConverterState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConverterState> {
        self.store.subscribe()
    }

    /// `to_amount / from_amount` with 4 decimals, if both are present.
    pub fn exchange_rate(&self) -> Option<String> {
        self.store.read(ConverterState::exchange_rate)
    }

    pub fn pipeline_phase(&self) -> PipelinePhase {
        self.pipeline.phase()
    }

    fn mutate(&self, f: impl FnOnce(&mut ConverterState)) {
        if self.store.update(f) {
            self.consider_conversion();
        }
    }

    fn consider_conversion(&self) {
        if self.store.read(ConverterState::should_convert) {
            self.pipeline.trigger();
        }
    }
}

impl<A: CurrencyApi> Drop for ConverterViewModel<A> {
    fn drop(&mut self) {
        if let Some(loader) = lock(&self.loader).take() {
            loader.abort();
        }
        self.pipeline.shutdown();
    }
}

async fn load_into<A: CurrencyApi>(
    cache: Arc<CurrencyCache<A>>,
    store: Arc<StateStore>,
    trigger: TriggerHandle<A>,
) {
    let currencies = cache.get().await;
    info!(count = currencies.len(), "currencies loaded");

    let mut selection_changed = false;
    store.update(|state| selection_changed = state.apply_currencies(currencies));

    if selection_changed {
        let (from, to, ready) =
            store.read(|s| (s.from_code.clone(), s.to_code.clone(), s.should_convert()));
        debug!(%from, %to, "selection repaired after currency load");
        if ready {
            trigger.trigger();
        }
    }
}
