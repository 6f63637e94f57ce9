//! End-to-end routing through scripted venues.

use std::sync::Arc;

use liqroute::collector::{CollectorConfig, MetricsCollector};
use liqroute::domain::{
    LiquidityOperation, OperationKind, OrderResult, TradingLimits, VenueId,
};
use liqroute::router::LiquidityRouter;
use liqroute::strategy::LowestCostStrategy;
use liqroute::testkit::venue::ScriptedVenue;
use liqroute::venue::VenueRegistry;
use rust_decimal_macros::dec;

fn router_for(venues: Vec<Arc<ScriptedVenue>>) -> LiquidityRouter {
    let mut registry = VenueRegistry::new();
    for v in venues {
        registry.register(v).unwrap();
    }
    let registry = Arc::new(registry);
    let collector = MetricsCollector::new(registry.clone(), CollectorConfig::default());
    LiquidityRouter::new(registry, collector, Arc::new(LowestCostStrategy::new()))
}

#[tokio::test]
async fn sell_routes_to_lowest_score_eligible_venue() {
    // Fee rates dominate the score here: Bitbank 0.10, Coincheck 0.05 (but
    // halted), Binance 0.40. Bitbank must win.
    let bitbank = Arc::new(
        ScriptedVenue::new(VenueId::Bitbank)
            .with_price(dec!(148.50))
            .with_fee_rate(dec!(0.10)),
    );
    let coincheck = Arc::new(
        ScriptedVenue::new(VenueId::Coincheck)
            .with_price(dec!(148.50))
            .with_fee_rate(dec!(0.05))
            .with_trading_allowed(false),
    );
    let binance = Arc::new(
        ScriptedVenue::new(VenueId::Binance)
            .with_price(dec!(148.50))
            .with_fee_rate(dec!(0.40)),
    );
    let router = router_for(vec![bitbank.clone(), coincheck.clone(), binance.clone()]);

    let op = LiquidityOperation::market_sell("TKN/JPY", dec!(1000), "scheduled rebalance");
    let result = router.execute(op).await;

    assert!(result.success, "detail: {}", result.detail);
    assert_eq!(result.venue, Some(VenueId::Bitbank));
    assert_eq!(result.kind, OperationKind::Sell);
    assert_eq!(result.executed_amount, dec!(1000));
    assert_eq!(result.avg_price, dec!(148.50));

    // Exactly one dispatch, on the selected venue only.
    assert_eq!(bitbank.dispatch_count(), 1);
    assert_eq!(bitbank.market_order_count(), 1);
    assert_eq!(coincheck.dispatch_count(), 0);
    assert_eq!(binance.dispatch_count(), 0);
}

#[tokio::test]
async fn no_eligible_venue_fails_without_dispatch() {
    let a = Arc::new(ScriptedVenue::new(VenueId::Bitbank).with_trading_allowed(false));
    let b = Arc::new(ScriptedVenue::new(VenueId::Binance).with_trading_allowed(false));
    let router = router_for(vec![a.clone(), b.clone()]);

    let result = router
        .execute(LiquidityOperation::market_buy("TKN/JPY", dec!(10), "test"))
        .await;

    assert!(!result.success);
    assert_eq!(result.detail, "no eligible venue");
    assert_eq!(result.venue, None);
    assert_eq!(a.dispatch_count() + b.dispatch_count(), 0);
}

#[tokio::test]
async fn provide_liquidity_is_rejected_as_unsupported() {
    let venue = Arc::new(ScriptedVenue::new(VenueId::Bitbank));
    let router = router_for(vec![venue.clone()]);

    let op = LiquidityOperation {
        kind: OperationKind::ProvideLiquidity,
        symbol: "TKN/JPY".to_string(),
        amount: dec!(100),
        target_price: None,
        reason: "test".to_string(),
    };
    let result = router.execute(op).await;

    assert!(!result.success);
    assert!(result.detail.contains("unsupported operation"));
    assert_eq!(venue.dispatch_count(), 0);
}

#[tokio::test]
async fn remove_liquidity_is_rejected_as_unsupported() {
    let venue = Arc::new(ScriptedVenue::new(VenueId::Bitbank));
    let router = router_for(vec![venue.clone()]);

    let op = LiquidityOperation {
        kind: OperationKind::RemoveLiquidity,
        symbol: "TKN/JPY".to_string(),
        amount: dec!(100),
        target_price: None,
        reason: "test".to_string(),
    };
    let result = router.execute(op).await;

    assert!(!result.success);
    assert!(result.detail.contains("unsupported operation"));
    assert_eq!(venue.dispatch_count(), 0);
}

#[tokio::test]
async fn venue_rejection_propagates_into_result_detail() {
    let venue = Arc::new(
        ScriptedVenue::new(VenueId::Bitbank).with_order_results(vec![OrderResult::rejected(
            VenueId::Bitbank,
            "insufficient balance",
        )]),
    );
    let router = router_for(vec![venue.clone()]);

    let result = router
        .execute(LiquidityOperation::market_sell("TKN/JPY", dec!(1000), "test"))
        .await;

    assert!(!result.success);
    assert_eq!(result.venue, Some(VenueId::Bitbank));
    assert_eq!(result.detail, "insufficient balance");
    // The rejection still counts as the one allowed dispatch; no retry.
    assert_eq!(venue.dispatch_count(), 1);
}

#[tokio::test]
async fn partial_fill_is_a_success_the_caller_can_inspect() {
    let venue = Arc::new(
        ScriptedVenue::new(VenueId::Bitbank).with_order_results(vec![OrderResult::filled(
            VenueId::Bitbank,
            "ord-7",
            dec!(600),
            dec!(148.20),
        )]),
    );
    let router = router_for(vec![venue.clone()]);

    let result = router
        .execute(LiquidityOperation::market_sell("TKN/JPY", dec!(1000), "test"))
        .await;

    assert!(result.success);
    assert_eq!(result.executed_amount, dec!(600));
    assert!(result.executed_amount < dec!(1000));
}

#[tokio::test]
async fn target_price_dispatches_a_limit_order() {
    let venue = Arc::new(ScriptedVenue::new(VenueId::Bitbank));
    let router = router_for(vec![venue.clone()]);

    let op = LiquidityOperation::limit_sell("TKN/JPY", dec!(100), dec!(150.00), "take profit");
    let result = router.execute(op).await;

    assert!(result.success);
    assert_eq!(venue.limit_order_count(), 1);
    assert_eq!(venue.market_order_count(), 0);
}

#[tokio::test]
async fn non_positive_amount_fails_without_dispatch() {
    let venue = Arc::new(ScriptedVenue::new(VenueId::Bitbank));
    let router = router_for(vec![venue.clone()]);

    let result = router
        .execute(LiquidityOperation::market_buy("TKN/JPY", dec!(0), "test"))
        .await;

    assert!(!result.success);
    assert!(result.detail.contains("invalid amount"));
    assert_eq!(venue.dispatch_count(), 0);
}

#[tokio::test]
async fn preflight_limit_violation_blocks_dispatch() {
    let venue = Arc::new(ScriptedVenue::new(VenueId::Bitbank).with_limits(TradingLimits {
        min_order_size: dec!(10),
        max_order_size: dec!(1000000),
        min_notional: dec!(100),
        price_precision: 2,
        size_precision: 4,
    }));
    let router = router_for(vec![venue.clone()]);

    let result = router
        .execute(LiquidityOperation::market_sell("TKN/JPY", dec!(5), "test"))
        .await;

    assert!(!result.success);
    assert!(result.detail.contains("below minimum order size"));
    assert_eq!(venue.dispatch_count(), 0);
}
