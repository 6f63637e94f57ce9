//! Cross-venue arbitrage detection.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::collector::MetricsCollector;
use crate::domain::{Amount, Price, Rate, VenueId};

/// A profitable cross-venue spread.
///
/// Carries the decision inputs only; sizing and execution belong to the
/// caller, which computes `expected_profit` for its chosen amount.
#[derive(Debug, Clone, Serialize)]
pub struct Opportunity {
    pub symbol: String,
    pub buy_venue: VenueId,
    pub sell_venue: VenueId,
    pub buy_price: Price,
    pub sell_price: Price,
    /// `(sell_price - buy_price) / buy_price`.
    pub profit_rate: Rate,
}

impl Opportunity {
    /// Gross profit of round-tripping `amount` across the two venues.
    /// Fees are not netted out; the analyzer's minimum profit threshold is
    /// expected to cover them.
    pub fn expected_profit(&self, amount: Amount) -> Amount {
        (self.sell_price - self.buy_price) * amount
    }
}

/// Pure min/max scan over a venue→price map.
///
/// Side-effect free; never places orders.
#[derive(Debug, Clone)]
pub struct ArbitrageAnalyzer {
    /// Spreads below this rate are not worth the round trip.
    pub min_profit_rate: Rate,
    /// Spreads above this rate are treated as stale or bad data, not as an
    /// opportunity.
    pub max_spread_rate: Rate,
}

impl Default for ArbitrageAnalyzer {
    fn default() -> Self {
        Self {
            min_profit_rate: Decimal::new(1, 2),  // 1%
            max_spread_rate: Decimal::new(10, 2), // 10%
        }
    }
}

impl ArbitrageAnalyzer {
    pub fn new(min_profit_rate: Rate, max_spread_rate: Rate) -> Self {
        Self {
            min_profit_rate,
            max_spread_rate,
        }
    }

    /// Find the widest profitable spread in `prices`, if any.
    ///
    /// Needs at least two venues. The cheapest venue becomes the buy side,
    /// the dearest the sell side; equal-priced venues resolve to the earliest
    /// in declaration order, so the scan is deterministic.
    pub fn find_opportunity(
        &self,
        symbol: &str,
        prices: &BTreeMap<VenueId, Price>,
    ) -> Option<Opportunity> {
        if prices.len() < 2 {
            return None;
        }

        let mut min: Option<(VenueId, Price)> = None;
        let mut max: Option<(VenueId, Price)> = None;
        for (&venue, &price) in prices {
            match min {
                Some((_, p)) if price >= p => {}
                _ => min = Some((venue, price)),
            }
            match max {
                Some((_, p)) if price <= p => {}
                _ => max = Some((venue, price)),
            }
        }
        let (buy_venue, buy_price) = min?;
        let (sell_venue, sell_price) = max?;

        if buy_venue == sell_venue || buy_price <= Decimal::ZERO {
            return None;
        }

        let profit_rate = (sell_price - buy_price) / buy_price;
        if profit_rate < self.min_profit_rate || profit_rate > self.max_spread_rate {
            return None;
        }

        Some(Opportunity {
            symbol: symbol.to_string(),
            buy_venue,
            sell_venue,
            buy_price,
            sell_price,
            profit_rate,
        })
    }
}

/// Periodic cross-venue sweep.
///
/// Collects live prices on an interval and logs any opportunity found.
/// Detection only — acting on an opportunity stays with the caller, which
/// owns order dispatch and its idempotency concerns.
pub struct ArbitrageMonitor {
    collector: MetricsCollector,
    analyzer: ArbitrageAnalyzer,
    symbol: String,
    interval: Duration,
}

impl ArbitrageMonitor {
    pub fn new(
        collector: MetricsCollector,
        analyzer: ArbitrageAnalyzer,
        symbol: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            collector,
            analyzer,
            symbol: symbol.into(),
            interval,
        }
    }

    /// One sweep: collect prices, analyze, log.
    pub async fn tick(&self) -> Option<Opportunity> {
        let prices = self.collector.collect_prices(&self.symbol).await;
        if prices.len() < 2 {
            debug!(venues = prices.len(), "not enough live quotes for arbitrage scan");
            return None;
        }

        match self.analyzer.find_opportunity(&self.symbol, &prices) {
            Some(opp) => {
                info!(
                    symbol = %opp.symbol,
                    buy_venue = %opp.buy_venue,
                    sell_venue = %opp.sell_venue,
                    buy_price = %opp.buy_price,
                    sell_price = %opp.sell_price,
                    profit_rate = %opp.profit_rate,
                    "arbitrage opportunity detected"
                );
                Some(opp)
            }
            None => {
                debug!(symbol = %self.symbol, "no arbitrage opportunity");
                None
            }
        }
    }

    /// Run sweeps forever at the configured interval.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn analyzer() -> ArbitrageAnalyzer {
        ArbitrageAnalyzer::default()
    }

    fn prices(entries: &[(VenueId, Price)]) -> BTreeMap<VenueId, Price> {
        entries.iter().copied().collect()
    }

    #[test]
    fn finds_widest_spread() {
        let map = prices(&[
            (VenueId::Bitbank, dec!(150.00)),
            (VenueId::Coincheck, dec!(152.00)),
            (VenueId::Binance, dec!(148.50)),
        ]);
        let opp = analyzer().find_opportunity("TKN/JPY", &map).unwrap();
        assert_eq!(opp.buy_venue, VenueId::Binance);
        assert_eq!(opp.sell_venue, VenueId::Coincheck);
        assert_eq!(opp.buy_price, dec!(148.50));
        assert_eq!(opp.sell_price, dec!(152.00));

        // (152.00 - 148.50) / 148.50 ≈ 0.02357
        let expected = dec!(3.50) / dec!(148.50);
        assert_eq!(opp.profit_rate, expected);
        assert!(opp.profit_rate > dec!(0.0235) && opp.profit_rate < dec!(0.0236));
    }

    #[test]
    fn spread_below_threshold_is_not_an_opportunity() {
        let map = prices(&[
            (VenueId::Bitbank, dec!(150.00)),
            (VenueId::Coincheck, dec!(150.01)),
        ]);
        assert!(analyzer().find_opportunity("TKN/JPY", &map).is_none());
    }

    #[test]
    fn spread_above_upper_guard_is_rejected_as_stale() {
        let map = prices(&[
            (VenueId::Bitbank, dec!(100.00)),
            (VenueId::Coincheck, dec!(150.00)),
        ]);
        assert!(analyzer().find_opportunity("TKN/JPY", &map).is_none());
    }

    #[test]
    fn fewer_than_two_venues_yields_none() {
        assert!(analyzer().find_opportunity("TKN/JPY", &BTreeMap::new()).is_none());
        let map = prices(&[(VenueId::Bitbank, dec!(150.00))]);
        assert!(analyzer().find_opportunity("TKN/JPY", &map).is_none());
    }

    #[test]
    fn equal_prices_everywhere_yields_none() {
        let map = prices(&[
            (VenueId::Bitbank, dec!(150.00)),
            (VenueId::Coincheck, dec!(150.00)),
            (VenueId::Binance, dec!(150.00)),
        ]);
        assert!(analyzer().find_opportunity("TKN/JPY", &map).is_none());
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        // Exactly 1% spread qualifies.
        let map = prices(&[
            (VenueId::Bitbank, dec!(100.00)),
            (VenueId::Coincheck, dec!(101.00)),
        ]);
        let opp = analyzer().find_opportunity("TKN/JPY", &map).unwrap();
        assert_eq!(opp.profit_rate, dec!(0.01));
    }

    #[test]
    fn expected_profit_scales_with_amount() {
        let map = prices(&[
            (VenueId::Bitbank, dec!(148.50)),
            (VenueId::Coincheck, dec!(152.00)),
        ]);
        let opp = analyzer().find_opportunity("TKN/JPY", &map).unwrap();
        assert_eq!(opp.expected_profit(dec!(1000)), dec!(3500.00));
    }
}
