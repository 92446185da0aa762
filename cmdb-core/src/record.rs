use crate::error::{InventoryError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// One inventory item exactly as the backend sent it.
///
/// No shape is enforced across categories; projection into table cells is
/// done by the registry's column definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRecord(Map<String, JsonValue>);

impl ResourceRecord {
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// Text for a field, or `None` when it is missing, null or blank.
    pub fn display_value(&self, field: &str) -> Option<String> {
        self.get(field).and_then(display_json)
    }

    /// First displayable value among candidate fields.
    pub fn first_display(&self, fields: &[&str]) -> Option<String> {
        fields.iter().find_map(|field| self.display_value(field))
    }

    pub fn name(&self) -> Option<String> {
        self.display_value("name")
    }

    /// Key/value pairs of the `tags` object, sorted by key.
    pub fn tags(&self) -> Vec<(String, String)> {
        let Some(JsonValue::Object(tags)) = self.get("tags") else {
            return Vec::new();
        };
        let mut pairs: Vec<(String, String)> = tags
            .iter()
            .map(|(key, value)| (key.clone(), display_json(value).unwrap_or_default()))
            .collect();
        pairs.sort();
        pairs
    }

    /// Every displayable field except `tags`, for the details panel.
    pub fn details(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != "tags")
            .filter_map(|(key, value)| display_json(value).map(|text| (key.clone(), text)))
            .collect()
    }
}


fn display_json(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(text) if text.trim().is_empty() => None,
        JsonValue::String(text) => Some(text.clone()),
        JsonValue::Bool(_) | JsonValue::Number(_) => Some(value.to_string()),
        JsonValue::Array(_) | JsonValue::Object(_) => Some(value.to_string()),
    }
}

/// Parse a listing body. An empty body or JSON `null` is an empty listing;
/// anything other than an array of objects is a parse failure.
pub fn parse_records(body: &str) -> Result<Vec<ResourceRecord>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<JsonValue>(body)? {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                JsonValue::Object(fields) => Ok(ResourceRecord(fields)),
                other => Err(InventoryError::Parse(format!(
                    "record {} is {}, expected a JSON object",
                    index,
                    json_kind(&other)
                ))),
            })
            .collect(),
        other => Err(InventoryError::Parse(format!(
            "expected a JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
