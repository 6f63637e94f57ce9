//! The routing audit record.

use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{Amount, Price};
use super::operation::{LiquidityOperation, OperationKind};
use super::order::OrderResult;
use super::venue::VenueId;

/// Outcome of one [`LiquidityRouter::execute`](crate::router::LiquidityRouter::execute)
/// call. Produced exactly once per invocation; persisting it for audit is the
/// caller's responsibility.
#[derive(Debug, Clone, Serialize)]
pub struct LiquidityResult {
    pub success: bool,
    pub venue: Option<VenueId>,
    pub kind: OperationKind,
    pub symbol: String,
    pub executed_amount: Amount,
    pub avg_price: Price,
    /// Human-readable outcome, including the venue's raw response on success.
    pub detail: String,
}

impl LiquidityResult {
    /// Wrap a venue's order result for the executed operation.
    pub fn from_order(op: &LiquidityOperation, order: &OrderResult) -> Self {
        if order.success {
            Self {
                success: true,
                venue: Some(order.venue),
                kind: op.kind,
                symbol: op.symbol.clone(),
                executed_amount: order.executed_amount,
                avg_price: order.avg_execution_price,
                detail: order.raw_response.to_string(),
            }
        } else {
            Self::failure(
                op,
                Some(order.venue),
                order
                    .error
                    .clone()
                    .unwrap_or_else(|| "order rejected".to_string()),
            )
        }
    }

    pub fn failure(
        op: &LiquidityOperation,
        venue: Option<VenueId>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            venue,
            kind: op.kind,
            symbol: op.symbol.clone(),
            executed_amount: Decimal::ZERO,
            avg_price: Decimal::ZERO,
            detail: detail.into(),
        }
    }
}
