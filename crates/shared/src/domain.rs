use std::{fmt, str::FromStr};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;

use crate::error::UnknownYear;

pub const DEFAULT_MAX_IDENTIFIER_LEN: usize = 5;
pub const EMPTY_VALUE_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Year {
    #[serde(rename = "2024")]
    Y2024,
    #[default]
    #[serde(rename = "2025")]
    Y2025,
}

impl Year {
    /// Selector order, newest first.
    pub const ALL: [Year; 2] = [Year::Y2025, Year::Y2024];

    pub fn as_str(self) -> &'static str {
        match self {
            Year::Y2024 => "2024",
            Year::Y2025 => "2025",
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Year {
    type Err = UnknownYear;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2024" => Ok(Year::Y2024),
            "2025" => Ok(Year::Y2025),
            other => Err(UnknownYear(other.to_string())),
        }
    }
}

/// An acknowledgment number that passed the non-empty check.
///
/// The text is kept exactly as entered; only the emptiness test trims.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AckNumber(String);

impl AckNumber {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AckNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cuts `raw` down to at most `max_len` characters, the way a capped text
/// input would.
pub fn cap_identifier(raw: &str, max_len: usize) -> String {
    raw.chars().take(max_len).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Absent,
}

impl ScalarValue {
    /// Nested arrays and objects are not scalars; they keep their compact JSON
    /// text so the field still shows up in the table.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => ScalarValue::Absent,
            Value::Bool(b) => ScalarValue::Bool(b),
            Value::Number(n) => ScalarValue::Number(n),
            Value::String(s) => ScalarValue::Text(s),
            nested @ (Value::Array(_) | Value::Object(_)) => ScalarValue::Text(nested.to_string()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ScalarValue::Text(s) => Value::String(s.clone()),
            ScalarValue::Number(n) => Value::Number(n.clone()),
            ScalarValue::Bool(b) => Value::Bool(*b),
            ScalarValue::Absent => Value::Null,
        }
    }

    pub fn is_falsy(&self) -> bool {
        match self {
            ScalarValue::Text(s) => s.is_empty(),
            ScalarValue::Number(n) => n.as_f64() == Some(0.0),
            ScalarValue::Bool(b) => !b,
            ScalarValue::Absent => true,
        }
    }

    /// Table cell text: the stringified value, or the placeholder dash for
    /// empty and falsy values.
    pub fn display(&self) -> String {
        if self.is_falsy() {
            return EMPTY_VALUE_PLACEHOLDER.to_string();
        }
        match self {
            ScalarValue::Text(s) => s.clone(),
            ScalarValue::Number(n) => display_number(n),
            ScalarValue::Bool(b) => b.to_string(),
            ScalarValue::Absent => EMPTY_VALUE_PLACEHOLDER.to_string(),
        }
    }
}

/// Integral floats print without a fraction (`12.0` as `12`, `1e5` as
/// `100000`) up to the 1e21 point where positional notation stops.
fn display_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
}

/// A flat case record in the key order the service sent it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupRecord {
    fields: Vec<(String, ScalarValue)>,
}

impl LookupRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. A repeated label overwrites the earlier value but keeps
    /// its original position.
    pub fn insert(&mut self, label: impl Into<String>, value: ScalarValue) {
        let label = label.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&ScalarValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.fields.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn rows(&self) -> Vec<DisplayRow> {
        self.iter()
            .map(|(label, value)| DisplayRow {
                label: label.to_string(),
                value: value.display(),
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, ScalarValue)> for LookupRecord {
    fn from_iter<I: IntoIterator<Item = (K, ScalarValue)>>(iter: I) -> Self {
        let mut record = LookupRecord::new();
        for (label, value) in iter {
            record.insert(label, value);
        }
        record
    }
}

impl Serialize for LookupRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, &value.to_json())?;
        }
        map.end()
    }
}

struct LookupRecordVisitor;

impl<'de> Visitor<'de> for LookupRecordVisitor {
    type Value = LookupRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object of case fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut record = LookupRecord::new();
        while let Some((label, value)) = access.next_entry::<String, Value>()? {
            record.insert(label, ScalarValue::from_json(value));
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for LookupRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LookupRecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_defaults_to_2025_and_lists_newest_first() {
        assert_eq!(Year::default(), Year::Y2025);
        assert_eq!(Year::ALL, [Year::Y2025, Year::Y2024]);
        assert_eq!("2024".parse::<Year>().expect("year"), Year::Y2024);
        assert!("2023".parse::<Year>().is_err());
    }

    #[test]
    fn ack_number_rejects_blank_but_keeps_raw_text() {
        assert!(AckNumber::parse("").is_none());
        assert!(AckNumber::parse("   \t").is_none());
        assert_eq!(AckNumber::parse(" 123").expect("ack").as_str(), " 123");
    }

    #[test]
    fn cap_identifier_counts_characters_not_bytes() {
        assert_eq!(cap_identifier("1234567", 5), "12345");
        assert_eq!(cap_identifier("ééééééé", 5), "ééééé");
        assert_eq!(cap_identifier("12", 5), "12");
    }

    #[test]
    fn record_keeps_body_key_order() {
        let record: LookupRecord =
            serde_json::from_str(r#"{"Zeta":"z","Alpha":"a","Mid":3}"#).expect("record");
        let labels: Vec<&str> = record.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn falsy_values_render_as_placeholder() {
        let record: LookupRecord = serde_json::from_str(
            r#"{"Name":"Jane Doe","Empty":"","Missing":null,"Zero":0,"Off":false,"On":true,"Amount":12.5}"#,
        )
        .expect("record");
        let rows = record.rows();
        let values: Vec<&str> = rows.iter().map(|row| row.value.as_str()).collect();
        assert_eq!(values, ["Jane Doe", "-", "-", "-", "-", "true", "12.5"]);
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        let record: LookupRecord =
            serde_json::from_str(r#"{"Amount":12.0,"Big":1e5,"Rate":0.25,"Neg":-3.0}"#)
                .expect("record");
        let rows = record.rows();
        let values: Vec<&str> = rows.iter().map(|row| row.value.as_str()).collect();
        assert_eq!(values, ["12", "100000", "0.25", "-3"]);
    }

    #[test]
    fn nested_values_are_kept_as_compact_json_text() {
        let record: LookupRecord =
            serde_json::from_str(r#"{"Tags":["a","b"],"Meta":{"k":1}}"#).expect("record");
        assert_eq!(
            record.get("Tags"),
            Some(&ScalarValue::Text(r#"["a","b"]"#.to_string()))
        );
        assert_eq!(record.rows()[1].value, r#"{"k":1}"#);
    }

    #[test]
    fn repeated_key_overwrites_in_place() {
        let record: LookupRecord =
            serde_json::from_str(r#"{"A":"first","B":"b","A":"last"}"#).expect("record");
        assert_eq!(record.len(), 2);
        assert_eq!(record.rows()[0].value, "last");
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(serde_json::from_str::<LookupRecord>("[1,2]").is_err());
        assert!(serde_json::from_str::<LookupRecord>("null").is_err());
    }

    #[test]
    fn record_serializes_back_in_order() {
        let record: LookupRecord = [
            ("Name", ScalarValue::Text("Jane".into())),
            ("Age", ScalarValue::Absent),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            serde_json::to_string(&record).expect("json"),
            r#"{"Name":"Jane","Age":null}"#
        );
    }
}
