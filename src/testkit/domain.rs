//! Builders for domain values used across tests.

use rust_decimal::Decimal;

use crate::domain::{Amount, LiquidityOperation, Price, Rate, VenueId, VenueMetrics};

/// Metrics entry with the fields selection cares about; liquidity fields get
/// placeholder depth.
pub fn metrics(
    venue: VenueId,
    best_bid: Price,
    best_ask: Price,
    fee_rate: Rate,
    latency_ms: u64,
    trading_allowed: bool,
) -> VenueMetrics {
    VenueMetrics {
        venue,
        best_bid,
        best_ask,
        mid_price: (best_bid + best_ask) / Decimal::TWO,
        base_liquidity: Decimal::from(10000),
        quote_liquidity: Decimal::from(1500000),
        fee_rate,
        trading_allowed,
        latency_ms,
    }
}

/// Market buy of `amount` TKN/JPY.
pub fn op_buy(amount: Amount) -> LiquidityOperation {
    LiquidityOperation::market_buy("TKN/JPY", amount, "test")
}

/// Market sell of `amount` TKN/JPY.
pub fn op_sell(amount: Amount) -> LiquidityOperation {
    LiquidityOperation::market_sell("TKN/JPY", amount, "test")
}
