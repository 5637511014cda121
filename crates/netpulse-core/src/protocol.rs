//! Routing protocol identification.

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Protocol tokens extracted from a configuration dump.
///
/// Sorted, so everything derived from the set comes out in a stable
/// order. Membership is what matters to consumers.
pub type ProtocolSet = BTreeSet<String>;

/// Routing protocols the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Bgp,
    Isis,
    Ospf,
    Mpls,
    Ldp,
}

impl Protocol {
    /// Every protocol with a tally implementation.
    pub const ALL: [Protocol; 5] = [
        Protocol::Bgp,
        Protocol::Isis,
        Protocol::Ospf,
        Protocol::Mpls,
        Protocol::Ldp,
    ];

    /// Parse a token as it appears in configuration text.
    ///
    /// Anything outside the known set returns `None`; callers decide
    /// whether that means "unsupported" or "not available".
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "bgp" => Some(Protocol::Bgp),
            "isis" => Some(Protocol::Isis),
            "ospf" => Some(Protocol::Ospf),
            "mpls" => Some(Protocol::Mpls),
            "ldp" => Some(Protocol::Ldp),
            _ => None,
        }
    }

    /// Token form, as it appears in configuration text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Bgp => "bgp",
            Protocol::Isis => "isis",
            Protocol::Ospf => "ospf",
            Protocol::Mpls => "mpls",
            Protocol::Ldp => "ldp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the set of active routing protocols from configuration text.
///
/// Every `protocols <name>` statement counts, wherever it appears in the
/// dump, and repeats are deduped. Text with no such statement yields an
/// empty set.
pub fn detect_protocols(config: &str) -> ProtocolSet {
    let pattern = Regex::new(r"protocols (\w+)").unwrap();
    pattern
        .captures_iter(config)
        .map(|captures| captures[1].to_string())
        .collect()
}
