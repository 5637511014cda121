//! OSPF neighbor tally.

use serde_json::Value;

use crate::error::TelemetryError;
use crate::payload::{field, Records};

use super::{tally_by_state, Tally};

/// Tally OSPF neighbors from a `get-ospf-neighbor-information` reply.
///
/// Only `Full` counts as up; every other state (including the 2-way and
/// exchange phases) counts as down.
pub fn tally(payload: &Value) -> Result<Tally, TelemetryError> {
    let info = field(payload, "ospf-neighbor-information")?;
    let neighbors = Records::from_value(field(info, "ospf-neighbor")?);
    Ok(tally_by_state(neighbors, "ospf-neighbor-state", "Full"))
}
