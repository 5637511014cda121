//! BGP peer tally.

use serde_json::Value;

use crate::error::TelemetryError;
use crate::payload::{count_field, field};

use super::Tally;

/// Tally BGP peers from a `get-bgp-summary-information` reply.
///
/// The summary carries totals directly, so there is no per-record walk:
/// up is `peer-count` minus `down-peer-count`.
pub fn tally(payload: &Value) -> Result<Tally, TelemetryError> {
    let info = field(payload, "bgp-information")?;
    let total = count_field(info, "peer-count")?;
    let down = count_field(info, "down-peer-count")?;
    let up = total
        .checked_sub(down)
        .ok_or_else(|| TelemetryError::malformed("down-peer-count"))?;
    Ok(Tally::new(up, down))
}
