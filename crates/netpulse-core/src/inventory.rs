//! Chassis inventory card lookup.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TelemetryError;
use crate::payload::{field, Records};

/// Location of a line card matching a model-number lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMatch {
    /// Slot name, e.g. `FPC 2`.
    pub slot: String,
    pub model_number: String,
}

/// Find the FPC slots carrying a given card model.
///
/// Walks `chassis-inventory.chassis.chassis-module`; modules without a
/// `name` or `model-number` are skipped, since fan trays and blanks
/// legitimately carry neither. No match is an empty list, not an error.
pub fn find_cards(payload: &Value, model_number: &str) -> Result<Vec<CardMatch>, TelemetryError> {
    let inventory = field(payload, "chassis-inventory")?;
    let chassis = field(inventory, "chassis")?;
    let modules = Records::from_value(field(chassis, "chassis-module")?);

    let mut matches = Vec::new();
    for module in modules {
        let name = module.get("name").and_then(Value::as_str);
        let model = module.get("model-number").and_then(Value::as_str);
        if let (Some(name), Some(model)) = (name, model) {
            if name.contains("FPC") && model == model_number {
                matches.push(CardMatch {
                    slot: name.to_string(),
                    model_number: model.to_string(),
                });
            }
        }
    }
    Ok(matches)
}
