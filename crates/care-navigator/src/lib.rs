pub mod config;
pub mod error;
pub mod pagination;
pub mod telemetry;
pub mod workflows;
