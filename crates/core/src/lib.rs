pub mod aggregator;
pub mod chain;
pub mod chart;
pub mod collector;
pub mod config;
pub mod error;
pub mod portfolio;
pub mod price;
pub mod session;
pub mod telemetry;
pub mod wallet;

#[cfg(test)]
mod test_utils;
