//! Routing orchestration: one operation in, one audit result out.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::collector::MetricsCollector;
use crate::domain::{
    LiquidityOperation, LiquidityResult, OperationKind, OrderResult, OrderSide, VenueId,
};
use crate::error::VenueError;
use crate::strategy::SelectionStrategy;
use crate::venue::{VenueClient, VenueRegistry};

/// Routes a [`LiquidityOperation`] to the best venue and executes it.
///
/// Hard rule: at most one order dispatch per [`execute`](Self::execute) call,
/// and no router-side retry — re-dispatching a financial order without an
/// idempotency key risks double execution, so retry policy belongs to the
/// caller. Expected failures (venue down, rejection, no eligible venue) come
/// back as a failed [`LiquidityResult`], never as a panic.
pub struct LiquidityRouter {
    registry: Arc<VenueRegistry>,
    collector: MetricsCollector,
    strategy: Arc<dyn SelectionStrategy>,
}

impl LiquidityRouter {
    pub fn new(
        registry: Arc<VenueRegistry>,
        collector: MetricsCollector,
        strategy: Arc<dyn SelectionStrategy>,
    ) -> Self {
        Self {
            registry,
            collector,
            strategy,
        }
    }

    /// Collect metrics, select a venue, dispatch the order, wrap the result.
    pub async fn execute(&self, op: LiquidityOperation) -> LiquidityResult {
        info!(
            kind = %op.kind,
            symbol = %op.symbol,
            amount = %op.amount,
            reason = %op.reason,
            "liquidity operation started"
        );

        if op.amount <= Decimal::ZERO {
            return LiquidityResult::failure(
                &op,
                None,
                format!("invalid amount: {}", op.amount),
            );
        }

        let metrics = self.collector.collect(&op.symbol).await;

        let venue = match self.strategy.select_venue(&metrics, &op) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, symbol = %op.symbol, "venue selection failed");
                return LiquidityResult::failure(&op, None, "no eligible venue");
            }
        };

        let client = match self.registry.get(venue) {
            Ok(c) => c.clone(),
            Err(e) => {
                // Strategy returned a venue the registry does not know; a
                // wiring bug, but still reported rather than panicked.
                warn!(error = %e, venue = %venue, "selected venue missing from registry");
                return LiquidityResult::failure(&op, Some(venue), e.to_string());
            }
        };

        let side = match op.kind {
            OperationKind::Buy => OrderSide::Buy,
            OperationKind::Sell => OrderSide::Sell,
            OperationKind::ProvideLiquidity | OperationKind::RemoveLiquidity => {
                warn!(kind = %op.kind, "unsupported operation requested");
                return LiquidityResult::failure(
                    &op,
                    Some(venue),
                    format!("unsupported operation: {}", op.kind),
                );
            }
        };

        if let Err(e) = self.preflight(client.as_ref(), &op, venue).await {
            warn!(venue = %venue, error = %e, "pre-flight limit check failed");
            return LiquidityResult::failure(&op, Some(venue), e.to_string());
        }

        info!(venue = %venue, kind = %op.kind, amount = %op.amount, "dispatching order");
        let dispatch = match op.target_price {
            Some(price) => {
                client
                    .place_limit_order(&op.symbol, op.amount, price, side)
                    .await
            }
            None => client.place_market_order(&op.symbol, op.amount, side).await,
        };

        let order: OrderResult = match dispatch {
            Ok(order) => order,
            Err(e) => {
                warn!(venue = %venue, error = %e, "order dispatch failed");
                return LiquidityResult::failure(&op, Some(venue), e.to_string());
            }
        };

        let result = LiquidityResult::from_order(&op, &order);
        if result.success {
            info!(
                venue = %venue,
                executed_amount = %result.executed_amount,
                avg_price = %result.avg_price,
                "liquidity operation executed"
            );
        } else {
            warn!(venue = %venue, detail = %result.detail, "liquidity operation rejected");
        }
        result
    }

    /// Validate the order against the venue's published limits before
    /// dispatch. A venue that cannot report limits skips the check; the
    /// venue-side validation still applies.
    async fn preflight(
        &self,
        client: &dyn VenueClient,
        op: &LiquidityOperation,
        venue: VenueId,
    ) -> Result<(), VenueError> {
        let limits = match client.trading_limits().await {
            Ok(l) => l,
            Err(e) => {
                warn!(venue = %venue, error = %e, "trading limits unavailable, skipping pre-flight");
                return Ok(());
            }
        };
        let price = op.target_price.unwrap_or(Decimal::ZERO);
        limits.validate(op.amount, price)
    }
}
