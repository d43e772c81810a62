//! Time related functions and types.
//!
//! The transfer manager stamps records with the current time (`created_at`,
//! `completed_at`, `last_polled_at`) and compares timestamps (scheduled
//! starts, stale snapshots). Reading the system time directly would make
//! those paths hard to test, so every crate reads the time through a clock
//! type:
//!
//! - [`clock::Working`]: the system clock, used in production.
//! - [`clock::Stopped`]: a thread-local fixed time that tests can move.
//!
//! Each crate declares a `CurrentClock` alias that resolves to the working
//! clock in production builds and to the stopped clock under `cfg(test)`.
//!
//! The [`conv`] module converts timestamps from and to `chrono` date times.
pub mod clock;
pub mod conv;
pub mod static_time;

#[macro_use]
extern crate lazy_static;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
