//! Per-venue market snapshot assembled by the collector.

use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{Amount, Price, Rate};
use super::venue::VenueId;

/// Sentinel latency for venues that never answered.
pub const LATENCY_UNAVAILABLE: u64 = u64::MAX;

/// Snapshot of one venue's market state for a symbol.
///
/// Recomputed on every collection cycle and discarded after use.
/// Invariants: `best_ask >= best_bid` whenever both are non-zero, and
/// `fee_rate >= 0`; the collector's synthesis path upholds both.
#[derive(Debug, Clone, Serialize)]
pub struct VenueMetrics {
    pub venue: VenueId,
    pub best_bid: Price,
    pub best_ask: Price,
    pub mid_price: Price,
    /// Base-asset depth summed across the book's bid side.
    pub base_liquidity: Amount,
    /// Quote-notional depth summed across the book's ask side.
    pub quote_liquidity: Amount,
    pub fee_rate: Rate,
    pub trading_allowed: bool,
    pub latency_ms: u64,
}

impl VenueMetrics {
    /// Entry for a venue that failed to respond, timed out, or reported
    /// trading disallowed. Kept in the metrics map so the selection strategy
    /// sees a consistent venue set.
    pub fn unavailable(venue: VenueId) -> Self {
        Self {
            venue,
            best_bid: Decimal::ZERO,
            best_ask: Decimal::ZERO,
            mid_price: Decimal::ZERO,
            base_liquidity: Decimal::ZERO,
            quote_liquidity: Decimal::ZERO,
            fee_rate: Decimal::ZERO,
            trading_allowed: false,
            latency_ms: LATENCY_UNAVAILABLE,
        }
    }

    /// Best ask minus best bid.
    pub fn spread(&self) -> Price {
        self.best_ask - self.best_bid
    }

    /// Latency expressed in seconds as a decimal, for score arithmetic.
    pub fn latency_secs(&self) -> Decimal {
        Decimal::from(self.latency_ms) / Decimal::from(1000)
    }
}
