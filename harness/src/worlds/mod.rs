//! Concrete problems for tests, benchmarks and the runner.

pub mod queens;
pub mod ring;
pub mod route_map;
