//! Concurrent per-venue metrics collection.

use futures_util::future::join_all;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::{Price, Rate, VenueId, VenueMetrics};
use crate::venue::{VenueClient, VenueRegistry};

/// Tunables for a collection pass.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Quote currency prices are requested in.
    pub quote_currency: String,
    /// Hard deadline per venue; slower venues are treated as unavailable.
    pub venue_timeout: Duration,
    /// Order book depth requested per venue.
    pub book_depth: usize,
    /// Spread synthesized around the mid price when a venue returns no book.
    pub synthetic_spread_rate: Rate,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            quote_currency: "JPY".to_string(),
            venue_timeout: Duration::from_secs(2),
            book_depth: 10,
            synthetic_spread_rate: Decimal::new(2, 3), // 0.2%
        }
    }
}

/// Polls every registered venue concurrently and assembles one
/// [`VenueMetrics`] snapshot per venue.
///
/// A venue that fails, times out, or reports trading disallowed is included
/// in the result map as [`VenueMetrics::unavailable`] rather than omitted, so
/// the selection strategy always sees the full venue set. The pass never
/// fails as a whole because of one venue.
pub struct MetricsCollector {
    registry: Arc<VenueRegistry>,
    config: CollectorConfig,
}

impl MetricsCollector {
    pub fn new(registry: Arc<VenueRegistry>, config: CollectorConfig) -> Self {
        Self { registry, config }
    }

    /// Snapshot all venues for `symbol`. One entry per registered venue.
    pub async fn collect(&self, symbol: &str) -> BTreeMap<VenueId, VenueMetrics> {
        let probes = self.registry.clients().map(|(id, client)| {
            let client = client.clone();
            async move {
                let metrics = match timeout(
                    self.config.venue_timeout,
                    self.probe(client.as_ref(), symbol),
                )
                .await
                {
                    Ok(m) => m,
                    Err(_) => {
                        warn!(
                            venue = %id,
                            timeout_ms = self.config.venue_timeout.as_millis() as u64,
                            "venue timed out during collection"
                        );
                        VenueMetrics::unavailable(id)
                    }
                };
                (id, metrics)
            }
        });

        join_all(probes).await.into_iter().collect()
    }

    /// Price fan-out for the arbitrage analyzer. Failed, timed out, and
    /// zero-priced venues are omitted; the analyzer only compares live quotes.
    pub async fn collect_prices(&self, symbol: &str) -> BTreeMap<VenueId, Price> {
        let probes = self.registry.clients().map(|(id, client)| {
            let client = client.clone();
            async move {
                let price = timeout(
                    self.config.venue_timeout,
                    client.current_price(symbol, &self.config.quote_currency),
                )
                .await;
                match price {
                    Ok(Ok(p)) if p > Decimal::ZERO => Some((id, p)),
                    Ok(Ok(_)) => None,
                    Ok(Err(e)) => {
                        warn!(venue = %id, error = %e, "price query failed");
                        None
                    }
                    Err(_) => {
                        warn!(venue = %id, "price query timed out");
                        None
                    }
                }
            }
        });

        join_all(probes).await.into_iter().flatten().collect()
    }

    async fn probe(&self, client: &dyn VenueClient, symbol: &str) -> VenueMetrics {
        let venue = client.id();

        if !client.is_available().await {
            debug!(venue = %venue, "venue reports unavailable");
            return VenueMetrics::unavailable(venue);
        }

        let started = Instant::now();
        let price = match client
            .current_price(symbol, &self.config.quote_currency)
            .await
        {
            Ok(p) if p > Decimal::ZERO => p,
            Ok(_) => {
                debug!(venue = %venue, symbol, "venue quotes no price for symbol");
                return VenueMetrics::unavailable(venue);
            }
            Err(e) => {
                warn!(venue = %venue, error = %e, "price query failed during collection");
                return VenueMetrics::unavailable(venue);
            }
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        let fee_rate = match client.fee_rate().await {
            Ok(f) if f >= Decimal::ZERO => f,
            _ => Decimal::ZERO,
        };

        let trading_allowed = match client.compliance_status().await {
            Ok(c) => c.api_healthy && c.trading_allowed,
            Err(e) => {
                warn!(venue = %venue, error = %e, "compliance query failed");
                false
            }
        };

        let book = client.order_book(symbol, self.config.book_depth).await.ok();

        // Real top of book when the venue gives a sane one, otherwise a
        // synthetic spread around the mid price.
        let (best_bid, best_ask, mid_price) = match book
            .as_ref()
            .and_then(|b| Some((b.best_bid()?.price, b.best_ask()?.price)))
        {
            Some((bid, ask)) if ask >= bid => (bid, ask, (bid + ask) / Decimal::TWO),
            _ => {
                let half = price * self.config.synthetic_spread_rate / Decimal::TWO;
                (price - half, price + half, price)
            }
        };

        let (base_liquidity, quote_liquidity) = book
            .as_ref()
            .map(|b| (b.bid_depth(), b.ask_notional()))
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));

        VenueMetrics {
            venue,
            best_bid,
            best_ask,
            mid_price,
            base_liquidity,
            quote_liquidity,
            fee_rate,
            trading_allowed,
            latency_ms,
        }
    }
}
