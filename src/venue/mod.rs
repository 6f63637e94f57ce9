//! Venue capability interface and the per-venue client registry.

mod mock;

pub use mock::{MockVenue, MockVenueConfig};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{
    Amount, Balance, ComplianceStatus, OrderBook, OrderResult, OrderSide, OrderStatus, Price,
    Rate, Trade, TradingLimits, VenueId,
};
use crate::error::{ConfigError, RouteError, VenueError};

/// Capability interface every venue adapter implements.
///
/// In a deployment each implementation translates these calls into one
/// venue's actual HTTP/WebSocket API. Adapters must contain their own
/// failures: a venue that is down returns `Err` (or a zero price sentinel)
/// rather than panicking, and the collector degrades it to an unavailable
/// metrics entry instead of aborting the pass.
#[async_trait]
pub trait VenueClient: Send + Sync {
    fn id(&self) -> VenueId;

    /// Cheap health probe, queried before anything else each cycle.
    async fn is_available(&self) -> bool;

    /// Best-effort current price of `symbol` in `quote` currency.
    ///
    /// Returns `Ok(0)` for symbols the venue does not quote; transient
    /// transport failures surface as `Err`, never as a panic.
    async fn current_price(&self, symbol: &str, quote: &str) -> Result<Price, VenueError>;

    /// Taker fee rate applied to executed notional.
    async fn fee_rate(&self) -> Result<Rate, VenueError>;

    async fn place_market_order(
        &self,
        symbol: &str,
        amount: Amount,
        side: OrderSide,
    ) -> Result<OrderResult, VenueError>;

    /// Place a limit order. When the price does not cross, the result is a
    /// success with `status = Pending`; the caller must not assume a fill.
    async fn place_limit_order(
        &self,
        symbol: &str,
        amount: Amount,
        price: Price,
        side: OrderSide,
    ) -> Result<OrderResult, VenueError>;

    async fn balance(&self, asset: &str) -> Result<Balance, VenueError>;

    /// Trades in `symbol` executed after `since`, newest first. Restartable
    /// by re-querying with a later `since`.
    async fn trade_history(
        &self,
        symbol: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Trade>, VenueError>;

    async fn order_book(&self, symbol: &str, depth: usize) -> Result<OrderBook, VenueError>;

    async fn trading_limits(&self) -> Result<TradingLimits, VenueError>;

    async fn compliance_status(&self) -> Result<ComplianceStatus, VenueError>;

    async fn cancel_order(&self, order_id: &str) -> Result<bool, VenueError>;

    async fn order_status(&self, order_id: &str) -> Result<OrderStatus, VenueError>;
}

impl std::fmt::Debug for dyn VenueClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VenueClient").field("id", &self.id()).finish()
    }
}

/// Explicit map from venue identity to its one client instance.
///
/// Built once at startup. Each venue gets its own adapter; two identities
/// never silently share an implementation.
#[derive(Default)]
pub struct VenueRegistry {
    clients: BTreeMap<VenueId, Arc<dyn VenueClient>>,
}

impl VenueRegistry {
    pub fn new() -> Self {
        Self {
            clients: BTreeMap::new(),
        }
    }

    /// Register a client under its own id. Registering the same venue twice
    /// is a wiring mistake and fails.
    pub fn register(&mut self, client: Arc<dyn VenueClient>) -> Result<(), ConfigError> {
        let id = client.id();
        if self.clients.contains_key(&id) {
            return Err(ConfigError::InvalidValue {
                field: "venues",
                reason: format!("venue {id} registered twice"),
            });
        }
        self.clients.insert(id, client);
        Ok(())
    }

    pub fn get(&self, id: VenueId) -> Result<&Arc<dyn VenueClient>, RouteError> {
        self.clients
            .get(&id)
            .ok_or(RouteError::VenueNotRegistered(id))
    }

    /// Registered venues in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = VenueId> + '_ {
        self.clients.keys().copied()
    }

    pub fn clients(&self) -> impl Iterator<Item = (VenueId, &Arc<dyn VenueClient>)> {
        self.clients.iter().map(|(id, c)| (*id, c))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
