use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Locations checked, in order, for the new mailing id in a creation response
pub const MAILING_ID_POINTERS: [&str; 4] = ["/data/mailing_id", "/data/id", "/mailing_id", "/id"];

/// Result of a successful container creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MailingContainer {
    /// Id assigned by the API to the new mailing
    pub mailing_id: i64,
    /// Campaign the mailing belongs to
    pub campaign_id: i64,
}

/// Body of the container creation request
#[derive(Debug, Clone, Serialize)]
pub struct CreateContainerRequest<'a> {
    /// Mailing name
    pub name: &'a str,
    /// Owning campaign
    pub campaign_id: i64,
    /// Free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<&'a Value>,
}

/// Body of the JSON and array upload requests
#[derive(Debug, Clone, Serialize)]
pub struct UploadRequest<'a, T: Serialize> {
    /// Target mailing
    pub mailing_id: i64,
    /// Contacts or rows
    pub data: &'a [T],
}

/// Body of the weight update request
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeightRequest {
    /// Target mailing
    pub mailing_id: i64,
    /// New dialing weight
    pub weight: i64,
}

/// Finds the mailing id in a creation response.
///
/// Checks [`MAILING_ID_POINTERS`] in order; integers and all-digit strings
/// qualify, anything else is skipped.
#[must_use]
pub fn extract_mailing_id(body: &Value) -> Option<i64> {
    MAILING_ID_POINTERS
        .iter()
        .filter_map(|pointer| body.pointer(pointer))
        .find_map(|value| match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse().ok()
            }
            _ => None,
        })
}

/// True unless the response carries an explicit `"success": false`
#[must_use]
pub fn reports_success(body: &Value) -> bool {
    !matches!(body.get("success"), Some(Value::Bool(false)))
}
