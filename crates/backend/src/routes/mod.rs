pub mod chains;
pub mod chart;
pub mod portfolio;
