//! Liquidity operations requested by the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{Amount, Price};

/// What the caller wants done with liquidity in a token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Buy,
    Sell,
    ProvideLiquidity,
    RemoveLiquidity,
}

impl OperationKind {
    /// Whether this kind maps to an order the router can dispatch.
    pub fn is_order(&self) -> bool {
        matches!(self, OperationKind::Buy | OperationKind::Sell)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Buy => "buy",
            OperationKind::Sell => "sell",
            OperationKind::ProvideLiquidity => "provide_liquidity",
            OperationKind::RemoveLiquidity => "remove_liquidity",
        };
        write!(f, "{s}")
    }
}

/// A single liquidity operation.
///
/// Created by the caller, consumed by exactly one
/// [`LiquidityRouter::execute`](crate::router::LiquidityRouter::execute) call.
/// When `target_price` is set, BUY/SELL dispatch as a limit order at that
/// price; otherwise as a market order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityOperation {
    pub kind: OperationKind,
    pub symbol: String,
    pub amount: Amount,
    pub target_price: Option<Price>,
    /// Free-text audit note; never interpreted.
    pub reason: String,
}

impl LiquidityOperation {
    pub fn market_buy(symbol: impl Into<String>, amount: Amount, reason: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Buy,
            symbol: symbol.into(),
            amount,
            target_price: None,
            reason: reason.into(),
        }
    }

    pub fn market_sell(
        symbol: impl Into<String>,
        amount: Amount,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: OperationKind::Sell,
            symbol: symbol.into(),
            amount,
            target_price: None,
            reason: reason.into(),
        }
    }

    pub fn limit_buy(
        symbol: impl Into<String>,
        amount: Amount,
        price: Price,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: OperationKind::Buy,
            symbol: symbol.into(),
            amount,
            target_price: Some(price),
            reason: reason.into(),
        }
    }

    pub fn limit_sell(
        symbol: impl Into<String>,
        amount: Amount,
        price: Price,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: OperationKind::Sell,
            symbol: symbol.into(),
            amount,
            target_price: Some(price),
            reason: reason.into(),
        }
    }

    pub fn is_buy(&self) -> bool {
        self.kind == OperationKind::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.kind == OperationKind::Sell
    }
}
