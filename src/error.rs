use thiserror::Error;

use crate::domain::{OperationKind, VenueId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by a single venue adapter.
///
/// These never cross the router's public boundary: the collector downgrades a
/// failing venue to an unavailable metrics entry, and the router folds a
/// dispatch failure into a failed [`LiquidityResult`](crate::domain::LiquidityResult).
#[derive(Error, Debug, Clone)]
pub enum VenueError {
    #[error("venue {0} is unavailable")]
    Unavailable(VenueId),

    #[error("venue {venue} timed out after {millis}ms")]
    Timeout { venue: VenueId, millis: u64 },

    #[error("insufficient balance: need {required} {asset}, have {available}")]
    InsufficientBalance {
        asset: String,
        required: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    },

    #[error("order rejected: {0}")]
    OrderRejected(String),

    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("unknown order id '{0}'")]
    UnknownOrder(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Routing-level failures surfaced to the caller as failed results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("no eligible venue")]
    NoEligibleVenue,

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(OperationKind),

    #[error("venue {0} is not registered")]
    VenueNotRegistered(VenueId),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Venue(#[from] VenueError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
