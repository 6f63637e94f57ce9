//! Venue selection strategies.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::domain::{LiquidityOperation, VenueId, VenueMetrics};
use crate::error::RouteError;

/// Scores venue snapshots against an intended operation and picks one.
///
/// Pure with respect to the inputs: the same metrics map and operation always
/// yield the same venue. The router depends only on this contract, so
/// alternative scorers plug in without router changes.
pub trait SelectionStrategy: Send + Sync {
    fn select_venue(
        &self,
        metrics: &BTreeMap<VenueId, VenueMetrics>,
        op: &LiquidityOperation,
    ) -> Result<VenueId, RouteError>;
}

/// Default strategy: lowest execution cost wins.
///
/// `score = spread + fee_rate + latency_ms / 1000`. The unit mix (price
/// units, a ratio and seconds) is a deliberate inherited convention; changing
/// it changes selection behavior. The same score is used for BUY and SELL —
/// there is no directional pricing against best ask or best bid. Ties break
/// toward the earlier venue in [`VenueId`] declaration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowestCostStrategy;

impl LowestCostStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Cost score for one venue; lower is better.
    pub fn score(metrics: &VenueMetrics) -> Decimal {
        metrics.spread() + metrics.fee_rate + metrics.latency_secs()
    }
}

impl SelectionStrategy for LowestCostStrategy {
    fn select_venue(
        &self,
        metrics: &BTreeMap<VenueId, VenueMetrics>,
        _op: &LiquidityOperation,
    ) -> Result<VenueId, RouteError> {
        let mut best: Option<(VenueId, Decimal)> = None;

        // BTreeMap iterates in VenueId declaration order; strict `<` keeps
        // the earliest venue on ties.
        for (venue, m) in metrics {
            if !m.trading_allowed {
                continue;
            }
            let score = Self::score(m);
            match best {
                Some((_, best_score)) if score >= best_score => {}
                _ => best = Some((*venue, score)),
            }
        }

        best.map(|(venue, _)| venue)
            .ok_or(RouteError::NoEligibleVenue)
    }
}
