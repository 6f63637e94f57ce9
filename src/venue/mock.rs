//! Seedable in-memory venue adapter.
//!
//! Simulates one venue's behavior for tests and demos: a bounded random walk
//! around a base price, balance-checked fills, a synthetic order book and a
//! trade history. The random source is seeded per instance so runs are
//! reproducible. Production adapters replace this with real API calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::{
    Amount, Balance, ComplianceStatus, OrderBook, OrderResult, OrderSide, OrderStatus, Price,
    PriceLevel, Rate, Trade, TradingLimits, VenueId,
};
use crate::error::VenueError;

use super::VenueClient;

/// Knobs for one mock venue instance.
#[derive(Debug, Clone)]
pub struct MockVenueConfig {
    pub venue: VenueId,
    /// The one symbol this venue quotes, e.g. "TKN/JPY".
    pub symbol: String,
    /// Seed for the price walk; equal seeds give equal runs.
    pub seed: u64,
    pub initial_price: Price,
    pub min_price: Price,
    pub max_price: Price,
    pub fee_rate: Rate,
    /// Simulated network latency applied to every call.
    pub latency: Duration,
    /// When set, compliance reports trading disallowed.
    pub halted: bool,
    pub base_balance: Amount,
    pub quote_balance: Amount,
}

impl MockVenueConfig {
    pub fn new(venue: VenueId, symbol: impl Into<String>, seed: u64) -> Self {
        Self {
            venue,
            symbol: symbol.into(),
            seed,
            initial_price: dec!(148.50),
            min_price: dec!(100),
            max_price: dec!(200),
            fee_rate: dec!(0.001),
            latency: Duration::ZERO,
            halted: false,
            base_balance: dec!(1000000),
            quote_balance: dec!(50000000),
        }
    }

    fn base_asset(&self) -> &str {
        self.symbol.split('/').next().unwrap_or(&self.symbol)
    }

    fn quote_asset(&self) -> &str {
        self.symbol.split('/').nth(1).unwrap_or("JPY")
    }
}

struct MockState {
    price: Price,
    rng: StdRng,
    balances: HashMap<String, Balance>,
    trades: Vec<Trade>,
    orders: HashMap<String, OrderStatus>,
    next_order_id: u64,
    next_trade_id: u64,
}

pub struct MockVenue {
    config: MockVenueConfig,
    state: Mutex<MockState>,
}

impl MockVenue {
    pub fn new(config: MockVenueConfig) -> Self {
        let mut balances = HashMap::new();
        balances.insert(
            config.base_asset().to_string(),
            Balance::new(config.base_asset(), config.base_balance, dec!(50000)),
        );
        balances.insert(
            config.quote_asset().to_string(),
            Balance::new(config.quote_asset(), config.quote_balance, dec!(1000000)),
        );
        let state = MockState {
            price: config.initial_price,
            rng: StdRng::seed_from_u64(config.seed),
            balances,
            trades: Vec::new(),
            orders: HashMap::new(),
            next_order_id: 1000,
            next_trade_id: 5000,
        };
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    fn quotes(&self, symbol: &str) -> bool {
        symbol == self.config.symbol
    }

    /// Advance the price walk by up to ±2% and clamp to the configured band.
    fn next_price(&self, state: &mut MockState) -> Price {
        let bps: i64 = state.rng.gen_range(-200..=200);
        let delta = state.price * Decimal::new(bps, 4);
        let mut price = state.price + delta;
        price = price.clamp(self.config.min_price, self.config.max_price);
        state.price = price;
        price.round_dp(2)
    }

    fn record_fill(
        &self,
        state: &mut MockState,
        symbol: &str,
        amount: Amount,
        price: Price,
        side: OrderSide,
    ) -> OrderResult {
        let order_id = format!("{:?}-{}", self.config.venue, state.next_order_id);
        state.next_order_id += 1;

        let base = self.config.base_asset().to_string();
        let quote = self.config.quote_asset().to_string();
        let notional = amount * price;
        match side {
            OrderSide::Sell => {
                if let Some(b) = state.balances.get_mut(&base) {
                    b.free -= amount;
                }
                if let Some(q) = state.balances.get_mut(&quote) {
                    q.free += notional;
                }
            }
            OrderSide::Buy => {
                if let Some(q) = state.balances.get_mut(&quote) {
                    q.free -= notional;
                }
                if let Some(b) = state.balances.get_mut(&base) {
                    b.free += amount;
                }
            }
        }

        let trade_id = format!("trade-{}", state.next_trade_id);
        state.next_trade_id += 1;
        state.trades.push(Trade {
            trade_id,
            order_id: order_id.clone(),
            symbol: symbol.to_string(),
            side,
            amount,
            price,
            fee: notional * self.config.fee_rate,
            fee_currency: quote,
            executed_at: Utc::now(),
        });
        state.orders.insert(order_id.clone(), OrderStatus::Filled);

        OrderResult::filled(self.config.venue, order_id, amount, price)
    }

    /// Whether the free balance covers the order.
    fn check_balance(
        &self,
        state: &MockState,
        amount: Amount,
        price: Price,
        side: OrderSide,
    ) -> bool {
        match side {
            OrderSide::Sell => state
                .balances
                .get(self.config.base_asset())
                .map(|b| b.can_cover(amount))
                .unwrap_or(false),
            OrderSide::Buy => state
                .balances
                .get(self.config.quote_asset())
                .map(|b| b.can_cover(amount * price))
                .unwrap_or(false),
        }
    }
}

#[async_trait]
impl VenueClient for MockVenue {
    fn id(&self) -> VenueId {
        self.config.venue
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn current_price(&self, symbol: &str, quote: &str) -> Result<Price, VenueError> {
        self.simulate_latency().await;
        if !self.quotes(symbol) || quote != self.config.quote_asset() {
            return Ok(Decimal::ZERO);
        }
        let mut state = self.state.lock();
        Ok(self.next_price(&mut state))
    }

    async fn fee_rate(&self) -> Result<Rate, VenueError> {
        Ok(self.config.fee_rate)
    }

    async fn place_market_order(
        &self,
        symbol: &str,
        amount: Amount,
        side: OrderSide,
    ) -> Result<OrderResult, VenueError> {
        self.simulate_latency().await;
        if !self.quotes(symbol) {
            return Err(VenueError::UnknownSymbol(symbol.to_string()));
        }
        let mut state = self.state.lock();
        let price = self.next_price(&mut state);
        if !self.check_balance(&state, amount, price, side) {
            return Ok(OrderResult::rejected(
                self.config.venue,
                "insufficient balance",
            ));
        }
        Ok(self.record_fill(&mut state, symbol, amount, price, side))
    }

    async fn place_limit_order(
        &self,
        symbol: &str,
        amount: Amount,
        price: Price,
        side: OrderSide,
    ) -> Result<OrderResult, VenueError> {
        self.simulate_latency().await;
        if !self.quotes(symbol) {
            return Err(VenueError::UnknownSymbol(symbol.to_string()));
        }
        let mut state = self.state.lock();
        let current = self.next_price(&mut state);
        if !self.check_balance(&state, amount, price, side) {
            return Ok(OrderResult::rejected(
                self.config.venue,
                "insufficient balance",
            ));
        }
        // A buy crosses when the limit is at or above the market, a sell when
        // at or below.
        let crosses = match side {
            OrderSide::Buy => price >= current,
            OrderSide::Sell => price <= current,
        };
        if crosses {
            Ok(self.record_fill(&mut state, symbol, amount, price, side))
        } else {
            let order_id =
                format!("{:?}-{}", self.config.venue, state.next_order_id);
            state.next_order_id += 1;
            state.orders.insert(order_id.clone(), OrderStatus::Pending);
            Ok(OrderResult::pending(self.config.venue, order_id, price))
        }
    }

    async fn balance(&self, asset: &str) -> Result<Balance, VenueError> {
        self.simulate_latency().await;
        let state = self.state.lock();
        Ok(state
            .balances
            .get(asset)
            .cloned()
            .unwrap_or_else(|| Balance::zero(asset)))
    }

    async fn trade_history(
        &self,
        symbol: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Trade>, VenueError> {
        self.simulate_latency().await;
        let state = self.state.lock();
        let mut trades: Vec<Trade> = state
            .trades
            .iter()
            .filter(|t| t.symbol == symbol && t.executed_at > since)
            .cloned()
            .collect();
        trades.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));
        Ok(trades)
    }

    async fn order_book(&self, symbol: &str, depth: usize) -> Result<OrderBook, VenueError> {
        self.simulate_latency().await;
        if !self.quotes(symbol) {
            return Err(VenueError::UnknownSymbol(symbol.to_string()));
        }
        let mut state = self.state.lock();
        let mid = self.next_price(&mut state);
        let half_tick = dec!(0.25);
        let tick = dec!(0.50);

        let mut bids = Vec::with_capacity(depth);
        let mut asks = Vec::with_capacity(depth);
        for i in 0..depth {
            let offset = half_tick + tick * Decimal::from(i as u64);
            let bid_amount = Decimal::from(1000 + state.rng.gen_range(0..5000));
            let ask_amount = Decimal::from(1000 + state.rng.gen_range(0..5000));
            bids.push(PriceLevel::new(mid - offset, bid_amount));
            asks.push(PriceLevel::new(mid + offset, ask_amount));
        }
        Ok(OrderBook::new(symbol, bids, asks))
    }

    async fn trading_limits(&self) -> Result<TradingLimits, VenueError> {
        Ok(TradingLimits {
            min_order_size: dec!(1),
            max_order_size: dec!(1000000),
            min_notional: dec!(100),
            price_precision: 2,
            size_precision: 4,
        })
    }

    async fn compliance_status(&self) -> Result<ComplianceStatus, VenueError> {
        self.simulate_latency().await;
        let note = match self.config.venue.region() {
            crate::domain::Region::Japan => "JFSA registered",
            crate::domain::Region::Global => "offshore entity",
            crate::domain::Region::Test => "test venue",
        };
        if self.config.halted {
            Ok(ComplianceStatus::halted(note))
        } else {
            Ok(ComplianceStatus::clear(note))
        }
    }

    async fn cancel_order(&self, order_id: &str) -> Result<bool, VenueError> {
        self.simulate_latency().await;
        let mut state = self.state.lock();
        match state.orders.get_mut(order_id) {
            Some(status @ OrderStatus::Pending) => {
                *status = OrderStatus::Cancelled;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(VenueError::UnknownOrder(order_id.to_string())),
        }
    }

    async fn order_status(&self, order_id: &str) -> Result<OrderStatus, VenueError> {
        self.simulate_latency().await;
        let state = self.state.lock();
        state
            .orders
            .get(order_id)
            .copied()
            .ok_or_else(|| VenueError::UnknownOrder(order_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn venue(seed: u64) -> MockVenue {
        MockVenue::new(MockVenueConfig::new(VenueId::Mock, "TKN/JPY", seed))
    }

    #[tokio::test]
    async fn equal_seeds_give_equal_price_walks() {
        let a = venue(42);
        let b = venue(42);
        for _ in 0..10 {
            let pa = a.current_price("TKN/JPY", "JPY").await.unwrap();
            let pb = b.current_price("TKN/JPY", "JPY").await.unwrap();
            assert_eq!(pa, pb);
        }
    }

    #[tokio::test]
    async fn price_stays_in_band() {
        let v = venue(7);
        for _ in 0..200 {
            let p = v.current_price("TKN/JPY", "JPY").await.unwrap();
            assert!(p >= dec!(100) && p <= dec!(200), "price {p} out of band");
        }
    }

    #[tokio::test]
    async fn unknown_symbol_prices_at_zero() {
        let v = venue(1);
        assert_eq!(v.current_price("OTHER/JPY", "JPY").await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn market_sell_moves_balances_and_records_trade() {
        let v = venue(3);
        let before = v.balance("TKN").await.unwrap().free;
        let result = v
            .place_market_order("TKN/JPY", dec!(1000), OrderSide::Sell)
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.executed_amount, dec!(1000));

        let after = v.balance("TKN").await.unwrap().free;
        assert_eq!(before - after, dec!(1000));

        let since = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let history = v.trade_history("TKN/JPY", since).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].side, OrderSide::Sell);
        assert!(history[0].fee > Decimal::ZERO);
    }

    #[tokio::test]
    async fn oversized_order_is_rejected_not_errored() {
        let v = venue(3);
        let result = v
            .place_market_order("TKN/JPY", dec!(2000000), OrderSide::Sell)
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("insufficient balance"));
    }

    #[tokio::test]
    async fn non_crossing_limit_order_rests_and_cancels() {
        let v = venue(9);
        // Far below any price in the band: a sell at 500 never crosses.
        let result = v
            .place_limit_order("TKN/JPY", dec!(10), dec!(500), OrderSide::Sell)
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.status, OrderStatus::Pending);

        let id = result.order_id.unwrap();
        assert_eq!(v.order_status(&id).await.unwrap(), OrderStatus::Pending);
        assert!(v.cancel_order(&id).await.unwrap());
        assert_eq!(v.order_status(&id).await.unwrap(), OrderStatus::Cancelled);
        // A second cancel is a no-op.
        assert!(!v.cancel_order(&id).await.unwrap());
    }

    #[tokio::test]
    async fn crossing_limit_buy_fills_at_limit_price() {
        let v = venue(11);
        // Above the whole band, so it always crosses.
        let result = v
            .place_limit_order("TKN/JPY", dec!(10), dec!(250), OrderSide::Buy)
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.status, OrderStatus::Filled);
        assert_eq!(result.avg_execution_price, dec!(250));
    }

    #[tokio::test]
    async fn order_book_sides_are_ordered_and_separated() {
        let v = venue(5);
        let book = v.order_book("TKN/JPY", 10).await.unwrap();
        assert_eq!(book.bids.len(), 10);
        assert_eq!(book.asks.len(), 10);
        assert!(book.best_bid().unwrap().price < book.best_ask().unwrap().price);
        for w in book.bids.windows(2) {
            assert!(w[0].price > w[1].price);
        }
        for w in book.asks.windows(2) {
            assert!(w[0].price < w[1].price);
        }
    }
}
