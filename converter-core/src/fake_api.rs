//! In-memory `CurrencyApi` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use converter_types::{ConversionRequest, ConversionResult, Currency, CurrencyApi, GatewayError};

/// One scripted answer for `convert`, served after `delay`.
pub struct Scripted {
    pub delay: Duration,
    pub answer: Result<ConversionResult, GatewayError>,
}

/// Fake API: a fixed currency list and either scripted conversion answers or
/// a flat rate once the script runs out.
pub struct FakeApi {
    currencies: Vec<Currency>,
    currencies_fail: bool,
    currency_delay: Duration,
    rate: f64,
    script: Mutex<VecDeque<Scripted>>,
    currency_calls: AtomicUsize,
    conversions: Mutex<Vec<ConversionRequest>>,
}

impl FakeApi {
    pub fn with_codes(codes: &[&str]) -> Self {
        Self {
            currencies: codes.iter().map(|c| Currency::new(*c, *c)).collect(),
            currencies_fail: false,
            currency_delay: Duration::ZERO,
            rate: 0.921549,
            script: Mutex::new(VecDeque::new()),
            currency_calls: AtomicUsize::new(0),
            conversions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_currency_delay(mut self, delay: Duration) -> Self {
        self.currency_delay = delay;
        self
    }

    pub fn failing_currencies(mut self) -> Self {
        self.currencies_fail = true;
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Queues an answer for the next `convert` call.
    pub fn answer(self, delay: Duration, answer: Result<ConversionResult, GatewayError>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted { delay, answer });
        self
    }

    pub fn currency_calls(&self) -> usize {
        self.currency_calls.load(Ordering::SeqCst)
    }

    pub fn conversions(&self) -> Vec<ConversionRequest> {
        self.conversions.lock().unwrap().clone()
    }
}

#[async_trait]
impl CurrencyApi for FakeApi {
    async fn currencies(&self) -> Result<Vec<Currency>, GatewayError> {
        self.currency_calls.fetch_add(1, Ordering::SeqCst);
        if !self.currency_delay.is_zero() {
            tokio::time::sleep(self.currency_delay).await;
        }
        if self.currencies_fail {
            return Err(GatewayError::Transport("connection refused".into()));
        }
        Ok(self.currencies.clone())
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, GatewayError> {
        if !request.is_valid() {
            return Ok(None);
        }
        self.conversions.lock().unwrap().push(request.clone());

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted { delay, answer }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                answer
            }
            None => Ok(Some(request.amount * self.rate)),
        }
    }
}
