//! Order book snapshot types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{Amount, Price};

/// A single price level in the order book.
#[derive(Debug, Clone, Serialize)]
pub struct PriceLevel {
    pub price: Price,
    pub amount: Amount,
}

impl PriceLevel {
    pub const fn new(price: Price, amount: Amount) -> Self {
        Self { price, amount }
    }

    /// Notional value of this level in quote currency.
    pub fn notional(&self) -> Amount {
        self.price * self.amount
    }
}

/// Snapshot of one venue's order book for a symbol.
///
/// Bids are ordered by price descending, asks ascending. The two sides are
/// independently ordered and never merged.
#[derive(Debug, Clone, Serialize)]
pub struct OrderBook {
    pub symbol: String,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
    pub fetched_at: DateTime<Utc>,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self {
            symbol: symbol.into(),
            bids,
            asks,
            fetched_at: Utc::now(),
        }
    }

    /// Best bid (highest buy price).
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Best ask (lowest sell price).
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// Base-asset depth on the bid side.
    pub fn bid_depth(&self) -> Amount {
        self.bids.iter().map(|l| l.amount).sum()
    }

    /// Quote-notional depth on the ask side.
    pub fn ask_notional(&self) -> Amount {
        self.asks.iter().map(PriceLevel::notional).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Mid of the top of book, when both sides have levels.
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.price + ask.price) / Decimal::TWO),
            _ => None,
        }
    }
}
