//! Order execution types shared by every venue adapter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{Amount, Price, Rate};
use super::venue::VenueId;
use crate::error::VenueError;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

/// Venue-side lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Filled,
    PartiallyFilled,
    Pending,
    Rejected,
    Cancelled,
}

/// Outcome of one order attempt against one venue.
///
/// A partial fill (`executed_amount < requested`) is a success, not an error;
/// callers must check `executed_amount` explicitly. A resting limit order is
/// a success with `status = Pending` and zero executed amount.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResult {
    pub success: bool,
    pub venue: VenueId,
    pub order_id: Option<String>,
    pub executed_amount: Amount,
    pub avg_execution_price: Price,
    pub status: OrderStatus,
    /// Venue response as reported, kept verbatim for the audit trail.
    pub raw_response: serde_json::Value,
    pub error: Option<String>,
}

impl OrderResult {
    pub fn filled(
        venue: VenueId,
        order_id: impl Into<String>,
        executed_amount: Amount,
        avg_execution_price: Price,
    ) -> Self {
        let order_id = order_id.into();
        Self {
            success: true,
            venue,
            raw_response: serde_json::json!({
                "order_id": order_id,
                "status": "filled",
                "executed_amount": executed_amount.to_string(),
                "price": avg_execution_price.to_string(),
            }),
            order_id: Some(order_id),
            executed_amount,
            avg_execution_price,
            status: OrderStatus::Filled,
            error: None,
        }
    }

    pub fn pending(venue: VenueId, order_id: impl Into<String>, limit_price: Price) -> Self {
        let order_id = order_id.into();
        Self {
            success: true,
            venue,
            raw_response: serde_json::json!({
                "order_id": order_id,
                "status": "pending",
                "limit_price": limit_price.to_string(),
            }),
            order_id: Some(order_id),
            executed_amount: Decimal::ZERO,
            avg_execution_price: Decimal::ZERO,
            status: OrderStatus::Pending,
            error: None,
        }
    }

    pub fn rejected(venue: VenueId, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            success: false,
            venue,
            order_id: None,
            executed_amount: Decimal::ZERO,
            avg_execution_price: Decimal::ZERO,
            status: OrderStatus::Rejected,
            raw_response: serde_json::json!({ "status": "rejected", "reason": reason }),
            error: Some(reason),
        }
    }

    pub fn is_partial(&self, requested: Amount) -> bool {
        self.success && self.status != OrderStatus::Pending && self.executed_amount < requested
    }
}

/// Free and locked balance of one asset on one venue.
#[derive(Debug, Clone, Serialize)]
pub struct Balance {
    pub asset: String,
    pub free: Amount,
    pub locked: Amount,
}

impl Balance {
    pub fn new(asset: impl Into<String>, free: Amount, locked: Amount) -> Self {
        Self {
            asset: asset.into(),
            free,
            locked,
        }
    }

    pub fn zero(asset: impl Into<String>) -> Self {
        Self::new(asset, Decimal::ZERO, Decimal::ZERO)
    }

    pub fn can_cover(&self, amount: Amount) -> bool {
        self.free >= amount
    }
}

/// One executed trade from a venue's history.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub trade_id: String,
    pub order_id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub amount: Amount,
    pub price: Price,
    pub fee: Amount,
    pub fee_currency: String,
    pub executed_at: DateTime<Utc>,
}

/// Per-venue order constraints used for pre-flight validation.
#[derive(Debug, Clone, Serialize)]
pub struct TradingLimits {
    pub min_order_size: Amount,
    pub max_order_size: Amount,
    pub min_notional: Amount,
    pub price_precision: u32,
    pub size_precision: u32,
}

impl TradingLimits {
    /// Check an order against these limits before dispatch. `price` is the
    /// limit price when known, otherwise the current mid price estimate.
    pub fn validate(&self, amount: Amount, price: Price) -> Result<(), VenueError> {
        if amount < self.min_order_size {
            return Err(VenueError::OrderRejected(format!(
                "amount {amount} below minimum order size {}",
                self.min_order_size
            )));
        }
        if amount > self.max_order_size {
            return Err(VenueError::OrderRejected(format!(
                "amount {amount} above maximum order size {}",
                self.max_order_size
            )));
        }
        let notional = amount * price;
        if price > Decimal::ZERO && notional < self.min_notional {
            return Err(VenueError::OrderRejected(format!(
                "notional {notional} below minimum {}",
                self.min_notional
            )));
        }
        Ok(())
    }
}

/// Venue availability and compliance posture, polled per collection cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceStatus {
    pub api_healthy: bool,
    pub trading_allowed: bool,
    pub withdrawal_allowed: bool,
    pub jurisdiction_note: String,
    pub checked_at: DateTime<Utc>,
}

impl ComplianceStatus {
    pub fn clear(note: impl Into<String>) -> Self {
        Self {
            api_healthy: true,
            trading_allowed: true,
            withdrawal_allowed: true,
            jurisdiction_note: note.into(),
            checked_at: Utc::now(),
        }
    }

    pub fn halted(note: impl Into<String>) -> Self {
        Self {
            api_healthy: true,
            trading_allowed: false,
            withdrawal_allowed: false,
            jurisdiction_note: note.into(),
            checked_at: Utc::now(),
        }
    }
}
