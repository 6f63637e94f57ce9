//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! - [`venue`] — [`ScriptedVenue`](venue::ScriptedVenue), a
//!   [`VenueClient`](crate::venue::VenueClient) with scripted responses and
//!   dispatch counters.
//! - [`domain`] — builders for metrics maps and operations so tests focus on
//!   assertions rather than construction boilerplate.

pub mod domain;
pub mod venue;
