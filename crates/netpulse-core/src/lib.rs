//! Telemetry normalization and health aggregation for network devices.
//!
//! The RPC layer hands this crate already-parsed payload trees
//! (`serde_json::Value`); everything here is a pure reduction over them:
//!
//! - [`protocol::detect_protocols`] finds the routing protocols a
//!   configuration dump activates.
//! - [`normalize::normalize`] reduces a protocol's status payload to an
//!   up/down tally, treating "one record" and "a list of records"
//!   uniformly.
//! - [`report::aggregate`] assembles the per-device health report.
//! - [`checks::CheckCatalog::generate`] turns a protocol set and a
//!   verbosity level into an ordered verification-command list.
//!
//! Transport, device inventory bootstrap, and rendering live in the
//! callers; errors here are scoped to one device or one protocol and
//! never poison a batch.

pub mod checks;
pub mod error;
pub mod inventory;
pub mod normalize;
pub mod payload;
pub mod protocol;
pub mod report;

pub use checks::{CheckCatalog, CheckLevel, CheckPlan};
pub use error::TelemetryError;
pub use normalize::{normalize, tally_protocols, MplsTally, ProtocolStatus, ProtocolTally, Tally};
pub use protocol::{detect_protocols, Protocol, ProtocolSet};
pub use report::{aggregate, DeviceReport};
