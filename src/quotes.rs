// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::models::{Investment, NewInvestment, ValidationError};
use crate::utils::http_client;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub open: Decimal,
    pub current: Decimal,
}

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("No quote API token configured (set WEALTHWISE_QUOTE_TOKEN)")]
    MissingToken,
    #[error("Quote request for {symbol} failed: {source}")]
    Http {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("No quote available for {0}")]
    NotFound(String),
}

pub trait QuoteSource: Send + Sync {
    fn quote(&self, symbol: &str) -> Result<Quote, QuoteError>;
}

#[derive(Debug, Deserialize)]
struct FinnhubQuote {
    #[serde(rename = "c")]
    current: Option<f64>,
    #[serde(rename = "o")]
    open: Option<f64>,
}

pub struct FinnhubClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl FinnhubClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: settings.quote_url.trim_end_matches('/').to_string(),
            token: settings.quote_token.clone(),
        })
    }
}

impl QuoteSource for FinnhubClient {
    fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let token = self.token.as_deref().ok_or(QuoteError::MissingToken)?;
        let http = |source| QuoteError::Http {
            symbol: symbol.to_string(),
            source,
        };
        let url = format!("{}/quote", self.base_url);
        let fq: FinnhubQuote = self
            .client
            .get(url)
            .query(&[("symbol", symbol), ("token", token)])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(http)?;

        // Unknown symbols come back as all-zero quotes.
        let current = fq
            .current
            .and_then(Decimal::from_f64_retain)
            .filter(|p| *p > Decimal::ZERO)
            .ok_or_else(|| QuoteError::NotFound(symbol.to_string()))?;
        let open = fq
            .open
            .and_then(Decimal::from_f64_retain)
            .unwrap_or(Decimal::ZERO)
            .round_dp(4);
        Ok(Quote {
            open,
            current: current.round_dp(4),
        })
    }
}

/// Current price for `symbol`, or `default` when the lookup fails.
pub fn price_or_default(source: &dyn QuoteSource, symbol: &str, default: Decimal) -> Decimal {
    match source.quote(symbol) {
        Ok(q) => q.current,
        Err(err) => {
            warn!(%symbol, error = %err, "quote lookup failed, using {}", default);
            default
        }
    }
}

/// Background poller for a single symbol. Stopping is guaranteed: `cancel()`
/// or dropping the handle signals the worker and joins it.
pub struct PriceRefresher {
    symbol: String,
    latest: Arc<Mutex<Option<Quote>>>,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl PriceRefresher {
    pub fn spawn(
        source: Arc<dyn QuoteSource>,
        symbol: &str,
        interval: Duration,
    ) -> std::io::Result<Self> {
        Self::spawn_with_listener(source, symbol, interval, |_| {})
    }

    /// Polls immediately, then once per `interval`; `listener` sees every
    /// successful quote on the worker thread.
    pub fn spawn_with_listener<F>(
        source: Arc<dyn QuoteSource>,
        symbol: &str,
        interval: Duration,
        mut listener: F,
    ) -> std::io::Result<Self>
    where
        F: FnMut(&Quote) + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let latest = Arc::new(Mutex::new(None));
        let shared = Arc::clone(&latest);
        let sym = symbol.to_string();

        let worker = thread::Builder::new()
            .name(format!("quote-refresh-{}", symbol))
            .spawn(move || {
                loop {
                    match source.quote(&sym) {
                        Ok(q) => {
                            debug!(symbol = %sym, current = %q.current, "quote refreshed");
                            *shared.lock() = Some(q);
                            listener(&q);
                        }
                        Err(err) => warn!(symbol = %sym, error = %err, "quote refresh failed"),
                    }
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        // stop signal, or the handle is gone
                        _ => break,
                    }
                }
                debug!(symbol = %sym, "quote refresher stopped");
            })?;

        info!(%symbol, ?interval, "started quote refresher");
        Ok(Self {
            symbol: symbol.to_string(),
            latest,
            stop: Some(stop_tx),
            worker: Some(worker),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn latest(&self) -> Option<Quote> {
        *self.latest.lock()
    }

    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!(symbol = %self.symbol, "quote refresher panicked");
            }
        }
    }
}

impl Drop for PriceRefresher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

type QuoteListener = Arc<dyn Fn(&Quote) + Send + Sync>;

/// The add-holding form while it is being filled in. A refresher runs only
/// while both a symbol and a share count are staged; it never touches
/// holdings that were already added.
pub struct StagedInvestment {
    source: Arc<dyn QuoteSource>,
    interval: Duration,
    draft: NewInvestment,
    refresher: Option<PriceRefresher>,
    listener: Option<QuoteListener>,
}

impl StagedInvestment {
    pub fn new(source: Arc<dyn QuoteSource>, interval: Duration) -> Self {
        Self {
            source,
            interval,
            draft: NewInvestment::default(),
            refresher: None,
            listener: None,
        }
    }

    /// Called on the refresher thread for every fresh quote.
    pub fn on_quote<F>(mut self, listener: F) -> Self
    where
        F: Fn(&Quote) + Send + Sync + 'static,
    {
        self.listener = Some(Arc::new(listener));
        self
    }

    pub fn set_symbol(&mut self, symbol: &str) -> std::io::Result<()> {
        self.draft.symbol = symbol.trim().to_uppercase();
        self.sync()
    }

    pub fn set_shares(&mut self, shares: &str) -> std::io::Result<()> {
        self.draft.shares = shares.trim().to_string();
        self.sync()
    }

    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    pub fn set_buy_price(&mut self, price: &str) {
        self.draft.buy_price = price.trim().to_string();
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresher.is_some()
    }

    pub fn latest_quote(&self) -> Option<Quote> {
        self.refresher.as_ref().and_then(PriceRefresher::latest)
    }

    /// Resets the form and stops any refresher.
    pub fn clear(&mut self) {
        self.refresher = None;
        self.draft = NewInvestment::default();
    }

    /// Builds the holding from the staged fields. The buy price falls back to
    /// the quote's open, then to zero; the current price to the buy price.
    pub fn submit(&mut self, id: u64) -> Result<Investment, ValidationError> {
        let mut draft = self.draft.clone();
        if let Some(q) = self.latest_quote() {
            if draft.buy_price.is_empty() && q.open > Decimal::ZERO {
                draft.buy_price = q.open.to_string();
            }
            draft.current_price = q.current.to_string();
        }
        if draft.buy_price.is_empty() {
            draft.buy_price = "0".into();
        }
        let investment = draft.build(id)?;
        self.clear();
        Ok(investment)
    }

    fn sync(&mut self) -> std::io::Result<()> {
        let staged = !self.draft.symbol.is_empty() && !self.draft.shares.is_empty();
        if !staged {
            self.refresher = None;
            return Ok(());
        }
        let current = self.refresher.as_ref().map(PriceRefresher::symbol);
        if current == Some(self.draft.symbol.as_str()) {
            return Ok(());
        }
        // stop the old poller before starting a new one
        self.refresher = None;
        let listener = self.listener.clone();
        self.refresher = Some(PriceRefresher::spawn_with_listener(
            Arc::clone(&self.source),
            &self.draft.symbol,
            self.interval,
            move |q| {
                if let Some(l) = &listener {
                    l(q);
                }
            },
        )?);
        Ok(())
    }
}
