//! Liqroute - multi-venue liquidity routing and arbitrage detection.
//!
//! This crate decides, for a requested buy/sell operation in a token pair,
//! which of several independent trading venues should execute it, executes
//! the order through a venue-agnostic client abstraction, and separately
//! analyzes cross-venue price dispersion for arbitrage opportunities.
//!
//! # Architecture
//!
//! Data flows one way: operation → router → collector → strategy → chosen
//! venue client → result.
//!
//! - [`venue`] - the [`VenueClient`](venue::VenueClient) capability trait,
//!   the per-venue [`VenueRegistry`](venue::VenueRegistry), and a seedable
//!   mock adapter
//! - [`collector`] - concurrent per-venue metrics collection with per-venue
//!   timeouts
//! - [`strategy`] - pluggable venue selection;
//!   [`LowestCostStrategy`](strategy::LowestCostStrategy) by default
//! - [`arbitrage`] - pure cross-venue spread analysis and a scheduled monitor
//! - [`router`] - the [`LiquidityRouter`](router::LiquidityRouter)
//!   orchestrator: at most one order dispatch per call
//! - [`domain`] - venue-agnostic value types: operations, metrics, orders,
//!   books, results
//! - [`config`] - TOML configuration and logging setup
//! - [`error`] - error taxonomy for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use liqroute::collector::{CollectorConfig, MetricsCollector};
//! use liqroute::domain::LiquidityOperation;
//! use liqroute::router::LiquidityRouter;
//! use liqroute::strategy::LowestCostStrategy;
//! use liqroute::venue::VenueRegistry;
//! use rust_decimal_macros::dec;
//!
//! # async fn demo() {
//! let registry = Arc::new(VenueRegistry::new());
//! let collector = MetricsCollector::new(registry.clone(), CollectorConfig::default());
//! let router = LiquidityRouter::new(registry, collector, Arc::new(LowestCostStrategy::new()));
//!
//! let op = LiquidityOperation::market_sell("TKN/JPY", dec!(1000), "scheduled rebalance");
//! let result = router.execute(op).await;
//! assert!(result.detail.len() > 0);
//! # }
//! ```

pub mod arbitrage;
pub mod collector;
pub mod config;
pub mod domain;
pub mod error;
pub mod router;
pub mod strategy;
pub mod venue;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
