//! Monetary types for price, amount and rate representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Amount (order size) represented as a Decimal for precision.
pub type Amount = Decimal;

/// Dimensionless rate (fee, profit) represented as a Decimal for precision.
pub type Rate = Decimal;
