pub mod cli;
pub mod configuration;
pub mod errors;
pub mod health;
pub mod metrics;
pub mod startup;
pub mod telemetry;
