//! Arbitrage sweep against scripted venues.

use std::sync::Arc;
use std::time::Duration;

use liqroute::arbitrage::{ArbitrageAnalyzer, ArbitrageMonitor};
use liqroute::collector::{CollectorConfig, MetricsCollector};
use liqroute::domain::VenueId;
use liqroute::testkit::venue::ScriptedVenue;
use liqroute::venue::VenueRegistry;
use rust_decimal_macros::dec;

fn monitor_for(venues: Vec<Arc<ScriptedVenue>>) -> ArbitrageMonitor {
    let mut registry = VenueRegistry::new();
    for v in venues {
        registry.register(v).unwrap();
    }
    let collector = MetricsCollector::new(Arc::new(registry), CollectorConfig::default());
    ArbitrageMonitor::new(
        collector,
        ArbitrageAnalyzer::default(),
        "TKN/JPY",
        Duration::from_secs(30),
    )
}

#[tokio::test]
async fn sweep_detects_cross_venue_spread() {
    let monitor = monitor_for(vec![
        Arc::new(ScriptedVenue::new(VenueId::Bitbank).with_price(dec!(150.00))),
        Arc::new(ScriptedVenue::new(VenueId::Coincheck).with_price(dec!(152.00))),
        Arc::new(ScriptedVenue::new(VenueId::Binance).with_price(dec!(148.50))),
    ]);

    let opp = monitor.tick().await.expect("opportunity");
    assert_eq!(opp.buy_venue, VenueId::Binance);
    assert_eq!(opp.sell_venue, VenueId::Coincheck);
    assert_eq!(opp.symbol, "TKN/JPY");
    assert!(opp.profit_rate > dec!(0.0235) && opp.profit_rate < dec!(0.0236));
    assert_eq!(opp.expected_profit(dec!(1000)), dec!(3500.00));
}

#[tokio::test]
async fn sweep_ignores_spreads_below_threshold() {
    let monitor = monitor_for(vec![
        Arc::new(ScriptedVenue::new(VenueId::Bitbank).with_price(dec!(150.00))),
        Arc::new(ScriptedVenue::new(VenueId::Coincheck).with_price(dec!(150.01))),
    ]);
    assert!(monitor.tick().await.is_none());
}

#[tokio::test]
async fn sweep_needs_at_least_two_live_quotes() {
    let monitor = monitor_for(vec![
        Arc::new(ScriptedVenue::new(VenueId::Bitbank).with_price(dec!(150.00))),
        Arc::new(ScriptedVenue::new(VenueId::Coincheck).with_failing_price()),
    ]);
    assert!(monitor.tick().await.is_none());
}

#[tokio::test]
async fn dead_venue_does_not_block_detection_on_the_others() {
    let monitor = monitor_for(vec![
        Arc::new(ScriptedVenue::new(VenueId::Bitbank).with_price(dec!(148.50))),
        Arc::new(ScriptedVenue::new(VenueId::Coincheck).with_price(dec!(152.00))),
        Arc::new(ScriptedVenue::new(VenueId::Binance).with_failing_price()),
    ]);

    let opp = monitor.tick().await.expect("opportunity");
    assert_eq!(opp.buy_venue, VenueId::Bitbank);
    assert_eq!(opp.sell_venue, VenueId::Coincheck);
}
