//! Shared, lazily fetched currency list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use converter_types::{Currency, CurrencyApi, GatewayError};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::debug;

use crate::store::lock;

/// A fetch that every caller can await; resolves once and replays.
pub type SharedCurrencies = Shared<BoxFuture<'static, Arc<[Currency]>>>;

/// Single-flight cache over `CurrencyApi::currencies`.
///
/// The first `get()` starts one fetch; later calls share it, in flight or
/// completed, until `refresh()` drops it. Failures resolve to an empty list.
pub struct CurrencyCache<A: CurrencyApi> {
    api: Arc<A>,
    slot: Mutex<Option<SharedCurrencies>>,
    fetches: AtomicU64,
}

impl<A: CurrencyApi> CurrencyCache<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            slot: Mutex::new(None),
            fetches: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// The cached list, starting a fetch if nothing is cached.
    pub fn get(&self) -> SharedCurrencies {
        let mut slot = lock(&self.slot);
        if let Some(pending) = slot.as_ref() {
            return pending.clone();
        }

        let generation = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        let api = Arc::clone(&self.api);
        let fetch = async move {
            let currencies = api
                .currencies()
                .await
                .unwrap_or_else(GatewayError::absorb("getCurrencies", Vec::new()));
            debug!(generation, count = currencies.len(), "currencies fetched");
            Arc::from(currencies)
        }
        .boxed()
        .shared();

        *slot = Some(fetch.clone());
        fetch
    }

    /// Forgets the cached list; the next `get()` fetches again.
    pub fn refresh(&self) {
        if lock(&self.slot).take().is_some() {
            debug!("currency cache invalidated");
        }
    }

    /// Number of fetches started so far.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }
}
