//! Device health report assembly.
//!
//! [`aggregate`] combines the per-device payloads the RPC layer already
//! fetched (facts, alarms, memory, CPU, commit history) with the
//! protocol tallies into one [`DeviceReport`]. No I/O happens here; a
//! malformed payload fails this device's report and nothing else.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::TelemetryError;
use crate::normalize::ProtocolStatus;
use crate::payload::{field, percent_field, str_field, Records};

/// Sentinel for optional facts the device did not report.
pub const NOT_AVAILABLE: &str = "NA";

/// Sentinel alarm entry meaning the device reported no active alarms.
pub const NO_ALARMS: &str = "None";

/// Uptime and reboot provenance for one routing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingEngine {
    pub uptime: String,
    pub last_reboot_reason: String,
}

impl RoutingEngine {
    /// Placeholder for a routing engine the chassis does not carry.
    fn absent() -> Self {
        Self {
            uptime: NOT_AVAILABLE.to_string(),
            last_reboot_reason: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Platform facts for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub version: String,
    pub model: String,
    pub serial_number: String,
    pub re0: RoutingEngine,
    pub re1: RoutingEngine,
}

/// Memory utilisation in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub used_pct: u8,
    pub free_pct: u8,
}

/// Control-plane CPU utilisation in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuUsage {
    pub usage_pct: u8,
}

/// Who committed the running configuration last, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub user: String,
    pub timestamp: String,
}

/// Point-in-time health snapshot for one device.
///
/// Built fresh per dashboard request and handed to the presentation
/// layer as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceReport {
    pub host: String,
    pub generated_at: DateTime<Utc>,
    pub system: SystemInfo,
    pub alarms: Vec<String>,
    pub memory: MemoryUsage,
    pub cpu: CpuUsage,
    pub commit: CommitInfo,
    pub protocols: BTreeMap<String, ProtocolStatus>,
}

/// Assemble a device report from already-fetched payloads.
pub fn aggregate(
    host: &str,
    facts: &Value,
    alarms: &Value,
    memory: &Value,
    cpu: &Value,
    commit: &Value,
    protocols: BTreeMap<String, ProtocolStatus>,
) -> Result<DeviceReport, TelemetryError> {
    debug!("assembling report for {}", host);
    Ok(DeviceReport {
        host: host.to_string(),
        generated_at: Utc::now(),
        system: system_info(facts)?,
        alarms: active_alarms(alarms),
        memory: memory_usage(memory)?,
        cpu: cpu_usage(cpu)?,
        commit: commit_info(commit)?,
        protocols,
    })
}

/// Platform facts from the facts payload.
///
/// `RE1` is optional: single-RE chassis omit it (or report it null), and
/// both of its fields fall back to `"NA"`. Everything else is required.
pub fn system_info(facts: &Value) -> Result<SystemInfo, TelemetryError> {
    let re0 = routing_engine(field(facts, "RE0")?)?;
    let re1 = match facts.get("RE1") {
        Some(block) if !block.is_null() => routing_engine(block)?,
        _ => RoutingEngine::absent(),
    };
    Ok(SystemInfo {
        version: str_field(facts, "version")?.to_string(),
        model: str_field(facts, "model")?.to_string(),
        serial_number: str_field(facts, "serialnumber")?.to_string(),
        re0,
        re1,
    })
}

fn routing_engine(block: &Value) -> Result<RoutingEngine, TelemetryError> {
    Ok(RoutingEngine {
        uptime: str_field(block, "up_time")?.to_string(),
        last_reboot_reason: str_field(block, "last_reboot_reason")?.to_string(),
    })
}

/// Active alarm descriptions from the alarm payload.
///
/// Zero, one, or many `alarm-detail` records; one or many go through the
/// usual record coercion. A missing key (no alarms), an empty list, or a
/// failed description lookup all collapse to the `["None"]` sentinel:
/// the user-facing "no alarms" signal, not an error.
pub fn active_alarms(payload: &Value) -> Vec<String> {
    match alarm_descriptions(payload) {
        Some(descriptions) if !descriptions.is_empty() => descriptions,
        _ => vec![NO_ALARMS.to_string()],
    }
}

fn alarm_descriptions(payload: &Value) -> Option<Vec<String>> {
    let details = payload.get("alarm-information")?.get("alarm-detail")?;
    Records::from_value(details)
        .iter()
        .map(|detail| {
            detail
                .get("alarm-description")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .collect()
}

/// Memory utilisation from the system memory payload.
///
/// The device reports the free side as a percent string like `"37%"`;
/// used is its complement.
pub fn memory_usage(payload: &Value) -> Result<MemoryUsage, TelemetryError> {
    let info = field(payload, "system-memory-information")?;
    let summary = field(info, "system-memory-summary-information")?;
    let free_pct = percent_field(summary, "system-memory-free-percent")?;
    Ok(MemoryUsage {
        used_pct: 100 - free_pct,
        free_pct,
    })
}

/// CPU utilisation from the routing engine payload.
///
/// Dual-RE chassis return one record per engine; the first record's
/// `cpu-user` is the one reported, same as the dashboard always has.
pub fn cpu_usage(payload: &Value) -> Result<CpuUsage, TelemetryError> {
    let info = field(payload, "route-engine-information")?;
    let engines = Records::from_value(field(info, "route-engine")?);
    let first = engines
        .iter()
        .next()
        .ok_or_else(|| TelemetryError::malformed("route-engine"))?;
    Ok(CpuUsage {
        usage_pct: percent_field(first, "cpu-user")?,
    })
}

/// Latest commit from the commit history payload.
pub fn commit_info(payload: &Value) -> Result<CommitInfo, TelemetryError> {
    let info = field(payload, "commit-information")?;
    let history = Records::from_value(field(info, "commit-history")?);
    let latest = history
        .iter()
        .next()
        .ok_or_else(|| TelemetryError::malformed("commit-history"))?;
    Ok(CommitInfo {
        user: str_field(latest, "user")?.to_string(),
        timestamp: str_field(field(latest, "date-time")?, "#text")?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dual_re_facts() -> Value {
        json!({
            "version": "20.4R3.8",
            "model": "mx480",
            "serialnumber": "JN12AB34CD",
            "RE0": {"up_time": "201 days, 4 hours", "last_reboot_reason": "Router rebooted after a normal shutdown."},
            "RE1": {"up_time": "201 days, 3 hours", "last_reboot_reason": "Router rebooted after a normal shutdown."},
        })
    }

    #[test]
    fn test_system_info_dual_re() {
        let info = system_info(&dual_re_facts()).unwrap();
        assert_eq!(info.version, "20.4R3.8");
        assert_eq!(info.model, "mx480");
        assert_eq!(info.serial_number, "JN12AB34CD");
        assert_eq!(info.re1.uptime, "201 days, 3 hours");
    }

    #[test]
    fn test_system_info_missing_re1_uses_sentinel() {
        let mut facts = dual_re_facts();
        facts.as_object_mut().unwrap().remove("RE1");
        let info = system_info(&facts).unwrap();
        assert_eq!(info.re1.uptime, NOT_AVAILABLE);
        assert_eq!(info.re1.last_reboot_reason, NOT_AVAILABLE);
        // RE0 stays intact.
        assert_eq!(info.re0.uptime, "201 days, 4 hours");
    }

    #[test]
    fn test_system_info_null_re1_uses_sentinel() {
        let mut facts = dual_re_facts();
        facts["RE1"] = Value::Null;
        let info = system_info(&facts).unwrap();
        assert_eq!(info.re1.uptime, NOT_AVAILABLE);
    }

    #[test]
    fn test_system_info_missing_version_is_malformed() {
        let mut facts = dual_re_facts();
        facts.as_object_mut().unwrap().remove("version");
        let err = system_info(&facts).unwrap_err();
        assert!(matches!(err, TelemetryError::MalformedPayload { ref field } if field == "version"));
    }

    #[test]
    fn test_alarms_absent_key_is_none_sentinel() {
        assert_eq!(active_alarms(&json!({})), vec![NO_ALARMS.to_string()]);
        assert_eq!(
            active_alarms(&json!({"alarm-information": {}})),
            vec![NO_ALARMS.to_string()]
        );
    }

    #[test]
    fn test_alarms_single_record() {
        let payload = json!({"alarm-information": {"alarm-detail": {
            "alarm-description": "Rescue configuration is not set",
        }}});
        assert_eq!(
            active_alarms(&payload),
            vec!["Rescue configuration is not set".to_string()]
        );
    }

    #[test]
    fn test_alarms_many_records() {
        let payload = json!({"alarm-information": {"alarm-detail": [
            {"alarm-description": "PEM 0 Not Present"},
            {"alarm-description": "Fan Tray Failure"},
        ]}});
        assert_eq!(
            active_alarms(&payload),
            vec!["PEM 0 Not Present".to_string(), "Fan Tray Failure".to_string()]
        );
    }

    #[test]
    fn test_memory_usage_complement() {
        let payload = json!({"system-memory-information": {
            "system-memory-summary-information": {"system-memory-free-percent": "37%"},
        }});
        let usage = memory_usage(&payload).unwrap();
        assert_eq!(usage.free_pct, 37);
        assert_eq!(usage.used_pct, 63);
    }

    #[test]
    fn test_cpu_usage_single_re() {
        let payload = json!({"route-engine-information": {"route-engine": {"cpu-user": "5"}}});
        assert_eq!(cpu_usage(&payload).unwrap().usage_pct, 5);
    }

    #[test]
    fn test_cpu_usage_dual_re_takes_first() {
        let payload = json!({"route-engine-information": {"route-engine": [
            {"cpu-user": "12"},
            {"cpu-user": "3"},
        ]}});
        assert_eq!(cpu_usage(&payload).unwrap().usage_pct, 12);
    }

    #[test]
    fn test_cpu_usage_empty_engine_list_is_malformed() {
        let payload = json!({"route-engine-information": {"route-engine": []}});
        assert!(cpu_usage(&payload).is_err());
    }

    #[test]
    fn test_commit_info_takes_latest_entry() {
        let payload = json!({"commit-information": {"commit-history": [
            {"user": "ops", "date-time": {"#text": "2024-03-01 10:22:31 UTC"}},
            {"user": "lab", "date-time": {"#text": "2024-02-28 08:00:00 UTC"}},
        ]}});
        let commit = commit_info(&payload).unwrap();
        assert_eq!(commit.user, "ops");
        assert_eq!(commit.timestamp, "2024-03-01 10:22:31 UTC");
    }

    #[test]
    fn test_commit_info_single_entry_history() {
        let payload = json!({"commit-information": {"commit-history":
            {"user": "ops", "date-time": {"#text": "2024-03-01 10:22:31 UTC"}},
        }});
        assert_eq!(commit_info(&payload).unwrap().user, "ops");
    }
}
