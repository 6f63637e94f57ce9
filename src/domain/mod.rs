//! Venue-agnostic domain types.
//!
//! Everything here is a value type: metrics and books are recomputed per
//! collection cycle and discarded, operations are consumed by a single router
//! call, and results are the durable audit artifacts returned to the caller.

mod book;
mod metrics;
mod money;
mod operation;
mod order;
mod result;
mod venue;

pub use book::{OrderBook, PriceLevel};
pub use metrics::{VenueMetrics, LATENCY_UNAVAILABLE};
pub use money::{Amount, Price, Rate};
pub use operation::{LiquidityOperation, OperationKind};
pub use order::{Balance, ComplianceStatus, OrderResult, OrderSide, OrderStatus, Trade, TradingLimits};
pub use result::LiquidityResult;
pub use venue::{Region, VenueId};
