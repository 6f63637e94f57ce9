//! Venue identifiers.
//!
//! The set of venues is fixed at compile time. Declaration order doubles as
//! the deterministic tie-break order used by selection strategies, so new
//! venues must be appended rather than inserted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a configured trading venue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VenueId {
    Bitbank,
    Coincheck,
    Bitflyer,
    Binance,
    Bybit,
    Mock,
}

impl VenueId {
    /// All venues in declaration (tie-break) order.
    pub const ALL: [VenueId; 6] = [
        VenueId::Bitbank,
        VenueId::Coincheck,
        VenueId::Bitflyer,
        VenueId::Binance,
        VenueId::Bybit,
        VenueId::Mock,
    ];

    /// Human-readable venue name.
    pub fn display_name(&self) -> &'static str {
        match self {
            VenueId::Bitbank => "Bitbank",
            VenueId::Coincheck => "Coincheck",
            VenueId::Bitflyer => "bitFlyer",
            VenueId::Binance => "Binance",
            VenueId::Bybit => "Bybit",
            VenueId::Mock => "Mock Venue",
        }
    }

    /// Regulatory region the venue operates in.
    pub fn region(&self) -> Region {
        match self {
            VenueId::Bitbank | VenueId::Coincheck | VenueId::Bitflyer => Region::Japan,
            VenueId::Binance | VenueId::Bybit => Region::Global,
            VenueId::Mock => Region::Test,
        }
    }

    pub fn is_japanese(&self) -> bool {
        self.region() == Region::Japan
    }

    pub fn is_global(&self) -> bool {
        self.region() == Region::Global
    }

    pub fn is_test(&self) -> bool {
        self.region() == Region::Test
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Regulatory region of a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Japan,
    Global,
    Test,
}
