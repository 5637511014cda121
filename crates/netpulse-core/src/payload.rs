//! Access helpers for raw RPC payloads.
//!
//! Device RPC replies arrive as already-parsed `serde_json::Value` trees.
//! Collections inside them are polymorphic in cardinality: exactly one
//! neighbor/session/adjacency comes back as a bare object, several come
//! back as an array. [`Records`] folds both shapes into "one or more
//! records" at the ingestion boundary, so no consumer branches on shape
//! and a lone record is never mistaken for an empty list.

use serde_json::Value;

use crate::error::TelemetryError;

/// One-or-many view over a polymorphic payload node.
#[derive(Debug, Clone, Copy)]
pub enum Records<'a> {
    /// A lone record returned as a bare object.
    Single(&'a Value),
    /// Zero or more records returned as an array.
    Many(&'a [Value]),
}

impl<'a> Records<'a> {
    /// Classify a payload node by shape.
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Records::Many(items),
            other => Records::Single(other),
        }
    }

    /// Number of records observed.
    pub fn len(&self) -> usize {
        match self {
            Records::Single(_) => 1,
            Records::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the records in payload order.
    pub fn iter(&self) -> RecordsIter<'a> {
        match self {
            Records::Single(record) => RecordsIter::Single(std::iter::once(*record)),
            Records::Many(items) => RecordsIter::Many(items.iter()),
        }
    }
}

impl<'a> IntoIterator for Records<'a> {
    type Item = &'a Value;
    type IntoIter = RecordsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`Records`].
pub enum RecordsIter<'a> {
    Single(std::iter::Once<&'a Value>),
    Many(std::slice::Iter<'a, Value>),
}

impl<'a> Iterator for RecordsIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RecordsIter::Single(inner) => inner.next(),
            RecordsIter::Many(inner) => inner.next(),
        }
    }
}

/// Look up an object field, naming the field on failure.
pub fn field<'a>(record: &'a Value, name: &str) -> Result<&'a Value, TelemetryError> {
    record
        .get(name)
        .ok_or_else(|| TelemetryError::malformed(name))
}

/// Field holding a string.
pub fn str_field<'a>(record: &'a Value, name: &str) -> Result<&'a str, TelemetryError> {
    field(record, name)?
        .as_str()
        .ok_or_else(|| TelemetryError::malformed(name))
}

/// Non-negative count carried as a JSON number or a numeric string.
///
/// Vendor replies encode most counters as strings ("10"), but some
/// transports hand them over as numbers already; both are accepted.
pub fn count_field(record: &Value, name: &str) -> Result<u64, TelemetryError> {
    let value = field(record, name)?;
    let count = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    count.ok_or_else(|| TelemetryError::malformed(name))
}

/// Percentage field in 0..=100, accepting `"37%"`, `"37"`, or `37`.
pub fn percent_field(record: &Value, name: &str) -> Result<u8, TelemetryError> {
    let value = field(record, name)?;
    let pct = match value {
        Value::Number(n) => n.as_u64().and_then(|v| u8::try_from(v).ok()),
        Value::String(s) => parse_percent(s),
        _ => None,
    };
    pct.filter(|p| *p <= 100)
        .ok_or_else(|| TelemetryError::malformed(name))
}

/// Parse a percent string, stripping a trailing `%` before conversion.
pub fn parse_percent(s: &str) -> Option<u8> {
    s.trim().trim_end_matches('%').trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn golden_records_single_object() {
        let value = json!({"state": "Up"});
        let records = Records::from_value(&value);
        assert_eq!(records.len(), 1);
        assert!(!records.is_empty());
        assert_eq!(records.iter().count(), 1);
    }

    #[test]
    fn golden_records_array() {
        let value = json!([{"state": "Up"}, {"state": "Down"}]);
        let records = Records::from_value(&value);
        assert_eq!(records.len(), 2);
        assert_eq!(records.iter().count(), 2);
    }

    #[test]
    fn golden_records_empty_array_is_not_a_record() {
        let value = json!([]);
        let records = Records::from_value(&value);
        assert_eq!(records.len(), 0);
        assert!(records.is_empty());
        assert_eq!(records.iter().count(), 0);
    }

    #[test]
    fn golden_field_missing_names_field() {
        let record = json!({"present": 1});
        let err = field(&record, "absent").unwrap_err();
        assert!(
            matches!(err, TelemetryError::MalformedPayload { ref field } if field == "absent")
        );
    }

    #[test]
    fn golden_count_field_accepts_string_and_number() {
        let record = json!({"as-string": "10", "as-number": 10, "padded": " 7 "});
        assert_eq!(count_field(&record, "as-string").unwrap(), 10);
        assert_eq!(count_field(&record, "as-number").unwrap(), 10);
        assert_eq!(count_field(&record, "padded").unwrap(), 7);
    }

    #[test]
    fn golden_count_field_rejects_junk() {
        let record = json!({"negative": "-3", "word": "many", "object": {}});
        assert!(count_field(&record, "negative").is_err());
        assert!(count_field(&record, "word").is_err());
        assert!(count_field(&record, "object").is_err());
    }

    #[test]
    fn golden_parse_percent_strips_suffix() {
        assert_eq!(parse_percent("37%"), Some(37));
        assert_eq!(parse_percent("37"), Some(37));
        assert_eq!(parse_percent(" 0% "), Some(0));
        assert_eq!(parse_percent("%"), None);
        assert_eq!(parse_percent("-1%"), None);
    }

    #[test]
    fn golden_percent_field_bounds() {
        let record = json!({"ok": "85%", "numeric": 12, "high": "140%"});
        assert_eq!(percent_field(&record, "ok").unwrap(), 85);
        assert_eq!(percent_field(&record, "numeric").unwrap(), 12);
        assert!(percent_field(&record, "high").is_err());
    }
}
