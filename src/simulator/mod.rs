//! Deterministic balance simulator.
//!
//! Steps the live battle tick once per simulated second for a preset
//! character and compares the outcome with the offline estimate for the
//! same window. The two differ whenever monsters hit hard enough to matter,
//! since the offline estimate never loses a fight.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::run_simulation;
