//! Domain primitive types used across the procmon workspace.
//!
//! Records arrive as loosely shaped JSON from the monitor. Conversion from
//! [`serde_json::Value`] never fails: absent or ill-typed fields collapse to
//! empty defaults so that rendering code can rely on every field being
//! present.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One key/value annotation inside a structured summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryField {
    /// Short label, also the render identity of the chip.
    pub key: String,
    /// Short display value.
    pub value: String,
    /// Longer explanatory text shown on hover.
    pub tooltip: String,
}

impl SummaryField {
    /// Creates a summary field.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        tooltip: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            tooltip: tooltip.into(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let key = scalar_text(value.get("key")?)?;
        Some(Self {
            key,
            value: value.get("value").and_then(scalar_text).unwrap_or_default(),
            tooltip: value.get("tooltip").and_then(scalar_text).unwrap_or_default(),
        })
    }
}

/// Summary payload of a record: a plain string or an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    /// Rendered verbatim.
    Text(String),
    /// Rendered as one chip per field, in order.
    Fields(Vec<SummaryField>),
}

impl Default for Summary {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Summary {
    /// Normalizes a raw summary value.
    ///
    /// Array elements that are not objects with a `key` are dropped; any
    /// other non-string shape becomes an empty text summary.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text.clone()),
            Value::Array(items) => {
                Self::Fields(items.iter().filter_map(SummaryField::from_value).collect())
            }
            _ => Self::default(),
        }
    }

    /// Returns `true` when there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Fields(fields) => fields.is_empty(),
        }
    }
}

impl fmt::Display for Summary {
    /// Flat single-line rendering: the text itself, or `key=value` pairs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Fields(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}={}", field.key, field.value)?;
                }
                Ok(())
            }
        }
    }
}

/// One captured event.
///
/// Deserialization accepts any JSON value and normalizes it, see
/// [`Record::from_value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "WireRecord")]
pub struct Record {
    /// Position in the captured stream, assigned by the monitor.
    pub sequence_index: u64,
    /// Display timestamp.
    pub timestamp: String,
    /// Process instance that produced the event.
    pub owner_id: u32,
    /// Event kind, usually the hooked function name.
    pub type_tag: String,
    /// Summary payload.
    pub summary: Summary,
    /// Whether the row is emphasized as dangerous.
    pub severe: bool,
}

impl Record {
    /// Creates a non-severe record.
    #[must_use]
    pub fn new(
        sequence_index: u64,
        timestamp: impl Into<String>,
        owner_id: u32,
        type_tag: impl Into<String>,
        summary: Summary,
    ) -> Self {
        Self {
            sequence_index,
            timestamp: timestamp.into(),
            owner_id,
            type_tag: type_tag.into(),
            summary,
            severe: false,
        }
    }

    /// Marks the record as severe.
    #[must_use]
    pub const fn severe(mut self, severe: bool) -> Self {
        self.severe = severe;
        self
    }

    /// Builds a record from the monitor's wire shape,
    /// `{"index", "time", "pid", "display": {"type", "summary"}, "severe"}`.
    ///
    /// Never fails. Missing or ill-typed fields fall back to zero, empty
    /// strings, an empty summary, or `false`.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let display = value.get("display");
        Self {
            sequence_index: value.get("index").and_then(Value::as_u64).unwrap_or(0),
            timestamp: value.get("time").map(display_time).unwrap_or_default(),
            owner_id: value
                .get("pid")
                .and_then(Value::as_u64)
                .and_then(|pid| u32::try_from(pid).ok())
                .unwrap_or(0),
            type_tag: display
                .and_then(|d| d.get("type"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            summary: display
                .and_then(|d| d.get("summary"))
                .map(Summary::from_value)
                .unwrap_or_default(),
            severe: value.get("severe").and_then(Value::as_bool).unwrap_or(false),
        }
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

#[derive(Serialize)]
struct WireDisplay {
    #[serde(rename = "type")]
    type_tag: String,
    summary: Summary,
}

#[derive(Serialize)]
struct WireRecord {
    index: u64,
    time: String,
    pid: u32,
    display: WireDisplay,
    severe: bool,
}

impl From<Record> for WireRecord {
    fn from(record: Record) -> Self {
        Self {
            index: record.sequence_index,
            time: record.timestamp,
            pid: record.owner_id,
            display: WireDisplay {
                type_tag: record.type_tag,
                summary: record.summary,
            },
            severe: record.severe,
        }
    }
}

/// Renders a JSON scalar as display text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Strings pass through; numbers are unix seconds shown as local wall time.
fn display_time(value: &Value) -> String {
    if let Some(secs) = value.as_i64() {
        return DateTime::from_timestamp(secs, 0).map_or_else(
            || secs.to_string(),
            |dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string(),
        );
    }
    scalar_text(value).unwrap_or_default()
}

/// A process instance as reported by the monitor's instance list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstanceEntry {
    /// Process id.
    pub pid: u32,
    /// Display name of the instance.
    #[serde(default)]
    pub name: String,
    /// Command line the instance was started with.
    #[serde(default)]
    pub command: Option<String>,
}

impl InstanceEntry {
    /// Human-readable description, `name (command)` when they differ.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.command.as_deref() {
            Some(command) if !command.is_empty() && command != self.name => {
                format!("{} ({command})", self.name)
            }
            _ => self.name.clone(),
        }
    }
}

/// Mapping from owner id to a human-readable process description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct InstanceDirectory(BTreeMap<u32, String>);

impl InstanceDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces the description of an owner.
    pub fn insert(&mut self, owner_id: u32, description: impl Into<String>) {
        let _ = self.0.insert(owner_id, description.into());
    }

    /// Looks up the description of an owner.
    #[must_use]
    pub fn describe(&self, owner_id: u32) -> Option<&str> {
        self.0.get(&owner_id).map(String::as_str)
    }

    /// Number of known owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no owner is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a directory from either `{"<pid>": "<description>"}` or an
    /// instance list `[{"pid", "name", "command"}]`. Unusable entries are
    /// skipped.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => map
                .iter()
                .filter_map(|(pid, desc)| Some((pid.parse().ok()?, scalar_text(desc)?)))
                .collect(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| InstanceEntry::deserialize(item).ok())
                .map(|entry| (entry.pid, entry.describe()))
                .collect(),
            _ => Self::new(),
        }
    }
}

impl From<Value> for InstanceDirectory {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl FromIterator<(u32, String)> for InstanceDirectory {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
