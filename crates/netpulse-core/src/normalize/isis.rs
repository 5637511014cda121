//! ISIS adjacency tally.

use serde_json::Value;

use crate::error::TelemetryError;
use crate::payload::{field, Records};

use super::{tally_by_state, Tally};

/// Tally ISIS adjacencies from a `get-isis-adjacency-information` reply.
///
/// An adjacency in state `Up` counts as up; any other state counts as
/// down.
pub fn tally(payload: &Value) -> Result<Tally, TelemetryError> {
    let info = field(payload, "isis-adjacency-information")?;
    let adjacencies = Records::from_value(field(info, "isis-adjacency")?);
    Ok(tally_by_state(adjacencies, "adjacency-state", "Up"))
}
