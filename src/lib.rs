//! Household energy advisor: interval analytics and advice ranking over
//! half-hour solar, consumption and tariff series.

pub mod advisor;
pub mod config;
pub mod domain;
pub mod error;
pub mod providers;
pub mod telemetry;
