//! The router depends only on the SelectionStrategy contract.

use std::collections::BTreeMap;
use std::sync::Arc;

use liqroute::collector::{CollectorConfig, MetricsCollector};
use liqroute::domain::{LiquidityOperation, VenueId, VenueMetrics};
use liqroute::error::RouteError;
use liqroute::router::LiquidityRouter;
use liqroute::strategy::SelectionStrategy;
use liqroute::testkit::venue::ScriptedVenue;
use liqroute::venue::VenueRegistry;
use rust_decimal_macros::dec;

/// Picks the eligible venue with the deepest quote-side liquidity.
struct LiquidityWeightedStrategy;

impl SelectionStrategy for LiquidityWeightedStrategy {
    fn select_venue(
        &self,
        metrics: &BTreeMap<VenueId, VenueMetrics>,
        _op: &LiquidityOperation,
    ) -> Result<VenueId, RouteError> {
        metrics
            .values()
            .filter(|m| m.trading_allowed)
            .max_by_key(|m| m.quote_liquidity)
            .map(|m| m.venue)
            .ok_or(RouteError::NoEligibleVenue)
    }
}

#[tokio::test]
async fn alternative_strategy_plugs_into_the_router() {
    use liqroute::domain::{OrderBook, PriceLevel};

    // Binance carries far more ask-side depth than Bitbank.
    let thin_book = OrderBook::new(
        "TKN/JPY",
        vec![PriceLevel::new(dec!(148.00), dec!(100))],
        vec![PriceLevel::new(dec!(148.50), dec!(100))],
    );
    let deep_book = OrderBook::new(
        "TKN/JPY",
        vec![PriceLevel::new(dec!(148.10), dec!(5000))],
        vec![PriceLevel::new(dec!(148.40), dec!(5000))],
    );

    let bitbank = Arc::new(
        ScriptedVenue::new(VenueId::Bitbank)
            .with_price(dec!(148.25))
            .with_fee_rate(dec!(0.0001))
            .with_book(thin_book),
    );
    let binance = Arc::new(
        ScriptedVenue::new(VenueId::Binance)
            .with_price(dec!(148.25))
            .with_fee_rate(dec!(0.0500))
            .with_book(deep_book),
    );

    let mut registry = VenueRegistry::new();
    registry.register(bitbank.clone()).unwrap();
    registry.register(binance.clone()).unwrap();
    let registry = Arc::new(registry);
    let collector = MetricsCollector::new(registry.clone(), CollectorConfig::default());

    // The cost strategy would pick Bitbank (tiny fee); the liquidity-weighted
    // strategy must route to Binance without any router change.
    let router = LiquidityRouter::new(registry, collector, Arc::new(LiquidityWeightedStrategy));
    let result = router
        .execute(LiquidityOperation::market_buy("TKN/JPY", dec!(500), "test"))
        .await;

    assert!(result.success);
    assert_eq!(result.venue, Some(VenueId::Binance));
    assert_eq!(binance.dispatch_count(), 1);
    assert_eq!(bitbank.dispatch_count(), 0);
}
