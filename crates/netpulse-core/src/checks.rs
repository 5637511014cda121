//! Verification command checklists.
//!
//! A [`CheckCatalog`] maps protocol names to per-level command lists. It
//! is deserialized once at startup (YAML, same shape the dashboard has
//! always used) and treated as read-only afterwards, so one catalog can
//! be shared by reference across concurrent generator calls.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TelemetryError;
use crate::protocol::ProtocolSet;

/// How much output a checklist should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    Terse,
    Verbose,
}

impl fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckLevel::Terse => f.write_str("terse"),
            CheckLevel::Verbose => f.write_str("verbose"),
        }
    }
}

/// Command lists for one protocol, by level.
///
/// A level a protocol does not define stays `None`; the generator
/// reports such protocols instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolChecks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terse: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<Vec<String>>,
}

impl ProtocolChecks {
    fn at_level(&self, level: CheckLevel) -> Option<&[String]> {
        match level {
            CheckLevel::Terse => self.terse.as_deref(),
            CheckLevel::Verbose => self.verbose.as_deref(),
        }
    }
}

/// Static catalog mapping protocol to per-level checklists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckCatalog {
    protocols: BTreeMap<String, ProtocolChecks>,
}

/// Ordered commands plus the protocols no checklist covered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPlan {
    pub commands: Vec<String>,
    pub unavailable: BTreeSet<String>,
}

impl CheckCatalog {
    /// Parse a catalog from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, TelemetryError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a catalog from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TelemetryError> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Checklist commands for one protocol at one level, if defined.
    pub fn commands_for(&self, protocol: &str, level: CheckLevel) -> Option<&[String]> {
        self.protocols
            .get(protocol)
            .and_then(|checks| checks.at_level(level))
    }

    /// Concatenate the checklists for every protocol in the set.
    ///
    /// Protocols the catalog does not cover at `level` are recorded in
    /// `unavailable` instead of failing the whole call; both halves of
    /// the plan always come back together. Command order follows the
    /// catalog within a protocol and set order across protocols.
    pub fn generate(&self, protocols: &ProtocolSet, level: CheckLevel) -> CheckPlan {
        let mut plan = CheckPlan::default();
        for name in protocols {
            match self.commands_for(name, level) {
                Some(commands) => plan.commands.extend(commands.iter().cloned()),
                None => {
                    plan.unavailable.insert(name.clone());
                }
            }
        }
        debug!(
            "generated {} {} commands, {} protocols unavailable",
            plan.commands.len(),
            level,
            plan.unavailable.len()
        );
        plan
    }
}
