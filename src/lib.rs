//! Endpoint Availability Monitor Library
//!
//! This library polls a list of HTTP endpoints on a fixed cadence, classifies
//! each check as UP or DOWN, and keeps a running availability percentage per
//! domain.

pub mod classifier;
pub mod config;
pub mod endpoint;
pub mod errors;
pub mod executor;
pub mod ledger;
pub mod monitor;

pub use classifier::{Health, classify};
pub use config::{LogFormat, MonitorConfig};
pub use endpoint::{Endpoint, RawEndpoint, load_endpoints};
pub use errors::{MonitorError, Result};
pub use executor::{HttpExecutor, Outcome, RequestExecutor};
pub use ledger::{AvailabilityLedger, DomainCounters, Observation};
pub use monitor::{HealthMonitor, MonitorState};
