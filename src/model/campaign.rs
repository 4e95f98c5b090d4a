use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A campaign as returned by the vendor API
///
/// The object is kept as-is; only `id`, `name` and `active` are inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Campaign(Map<String, Value>);

impl Campaign {
    /// Integer id, when the API sent one
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    /// Display name, empty when missing
    #[must_use]
    pub fn name(&self) -> String {
        match self.0.get("name") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Active flag; a campaign without one counts as active
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.get("active").is_none_or(is_truthy)
    }

    /// Case-insensitive substring match on the name
    #[must_use]
    pub fn name_contains(&self, filter: &str) -> bool {
        self.name().to_lowercase().contains(&filter.to_lowercase())
    }

    /// Raw field access
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Underlying JSON object
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the campaign, returning the JSON object
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Campaign {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Extracts the campaign list from a listing response.
///
/// Reads the first non-empty array among `data` and `campaigns`; entries that
/// are not JSON objects are skipped.
#[must_use]
pub fn campaigns_from_response(body: &Value) -> Vec<Campaign> {
    ["data", "campaigns"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_array))
        .find(|items| !items.is_empty())
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .cloned()
                .map(Campaign::from)
                .collect()
        })
        .unwrap_or_default()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
