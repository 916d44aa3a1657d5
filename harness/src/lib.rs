//! Lodestar Harness: concrete problems and a strategy runner.
//!
//! The harness hosts the worlds that tests and benchmarks search over, and a
//! runner that dispatches any strategy by name from a JSON config.
//!
//! The harness does NOT implement search logic. It delegates to
//! `lodestar_search`. Worlds provide domain data only; the runner owns
//! configuration and reporting.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod runner;
pub mod worlds;
