//! Per-protocol status normalization.
//!
//! Each protocol's raw status payload reduces to a canonical up/down
//! tally. The cardinality ambiguity (one record vs. a list of records)
//! is resolved once, by [`Records`], before any reduction runs; the
//! per-protocol modules only decide how a record classifies.

pub mod bgp;
pub mod isis;
pub mod ldp;
pub mod mpls;
pub mod ospf;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::TelemetryError;
use crate::payload::Records;
use crate::protocol::{Protocol, ProtocolSet};

/// Up/down counts for one protocol's sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub up_count: u64,
    pub down_count: u64,
}

impl Tally {
    pub fn new(up_count: u64, down_count: u64) -> Self {
        Self {
            up_count,
            down_count,
        }
    }

    /// Records observed in the payload.
    pub fn total(&self) -> u64 {
        self.up_count + self.down_count
    }
}

/// Up/down counts for each MPLS LSP role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MplsTally {
    pub ingress: Tally,
    pub egress: Tally,
    pub transit: Tally,
}

/// Canonical tally for one protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProtocolTally {
    /// Single up/down pair (BGP, ISIS, OSPF, LDP).
    Sessions(Tally),
    /// Per-role breakdown (MPLS).
    Lsp(MplsTally),
}

/// Reduce one protocol's raw status payload to its canonical tally.
///
/// Fails with `UnsupportedProtocol` for tokens outside the known kinds;
/// the caller reports those as "not available" rather than dropping them.
pub fn normalize(protocol_id: &str, payload: &Value) -> Result<ProtocolTally, TelemetryError> {
    let protocol = Protocol::from_token(protocol_id)
        .ok_or_else(|| TelemetryError::UnsupportedProtocol(protocol_id.to_string()))?;
    match protocol {
        Protocol::Bgp => bgp::tally(payload).map(ProtocolTally::Sessions),
        Protocol::Isis => isis::tally(payload).map(ProtocolTally::Sessions),
        Protocol::Ospf => ospf::tally(payload).map(ProtocolTally::Sessions),
        Protocol::Ldp => ldp::tally(payload).map(ProtocolTally::Sessions),
        Protocol::Mpls => mpls::tally(payload).map(ProtocolTally::Lsp),
    }
}

/// Walk every record and classify by a state field.
///
/// A record missing the field counts as down.
fn tally_by_state(records: Records<'_>, state_field: &str, up_state: &str) -> Tally {
    let mut tally = Tally::default();
    for record in records {
        if record.get(state_field).and_then(Value::as_str) == Some(up_state) {
            tally.up_count += 1;
        } else {
            tally.down_count += 1;
        }
    }
    tally
}

/// Outcome of tallying one detected protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProtocolStatus {
    /// Tally computed from the protocol's status payload.
    Tallied { tally: ProtocolTally },
    /// Detected on the device but not tallied here, either because the
    /// token is unrecognized or because no payload was fetched for it.
    NotAvailable,
    /// The payload failed normalization; siblings are unaffected.
    Failed { reason: String },
}

/// Tally every detected protocol from already-fetched payloads.
///
/// Protocols without a usable tally land in the map as `NotAvailable` or
/// `Failed` instead of being dropped, and one bad payload never aborts
/// the rest.
pub fn tally_protocols(
    protocols: &ProtocolSet,
    payloads: &BTreeMap<String, Value>,
) -> BTreeMap<String, ProtocolStatus> {
    let mut statuses = BTreeMap::new();
    for name in protocols {
        let status = match payloads.get(name) {
            None => ProtocolStatus::NotAvailable,
            Some(payload) => match normalize(name, payload) {
                Ok(tally) => ProtocolStatus::Tallied { tally },
                Err(TelemetryError::UnsupportedProtocol(_)) => ProtocolStatus::NotAvailable,
                Err(err) => {
                    debug!("tally failed for {}: {}", name, err);
                    ProtocolStatus::Failed {
                        reason: err.to_string(),
                    }
                }
            },
        };
        statuses.insert(name.clone(), status);
    }
    statuses
}
