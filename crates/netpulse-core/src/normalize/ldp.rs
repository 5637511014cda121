//! LDP session tally.

use serde_json::Value;

use crate::error::TelemetryError;
use crate::payload::{field, Records};

use super::{tally_by_state, Tally};

/// Tally LDP sessions from a `get-ldp-session-information` reply.
///
/// A session in state `Operational` counts as up; anything else counts
/// as down.
pub fn tally(payload: &Value) -> Result<Tally, TelemetryError> {
    let info = field(payload, "ldp-session-information")?;
    let sessions = Records::from_value(field(info, "ldp-session")?);
    Ok(tally_by_state(sessions, "ldp-session-state", "Operational"))
}
