//! MPLS LSP tally, broken down by session role.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::TelemetryError;
use crate::payload::{count_field, field, str_field, Records};

use super::{MplsTally, Tally};

/// Tally MPLS LSPs from a `get-mpls-lsp-information` reply.
///
/// Each `rsvp-session-data` record already carries its own counters, so
/// the reduction extracts by `session-type` instead of walking states. A
/// reply that does not cover all of Ingress/Egress/Transit fails with
/// `MissingSessionType`.
pub fn tally(payload: &Value) -> Result<MplsTally, TelemetryError> {
    let info = field(payload, "mpls-lsp-information")?;
    let sessions = Records::from_value(field(info, "rsvp-session-data")?);

    let mut by_type: BTreeMap<String, Tally> = BTreeMap::new();
    for session in sessions {
        let session_type = str_field(session, "session-type")?;
        let counts = Tally::new(
            count_field(session, "up-count")?,
            count_field(session, "down-count")?,
        );
        by_type.insert(session_type.to_string(), counts);
    }

    let role = |name: &str| {
        by_type
            .get(name)
            .copied()
            .ok_or_else(|| TelemetryError::MissingSessionType(name.to_string()))
    };

    Ok(MplsTally {
        ingress: role("Ingress")?,
        egress: role("Egress")?,
        transit: role("Transit")?,
    })
}
