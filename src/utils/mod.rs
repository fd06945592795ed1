pub mod capabilities;
pub mod config;
pub mod sanitize;
pub mod telemetry;
