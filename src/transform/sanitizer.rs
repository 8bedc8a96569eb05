//! Payload sanitizer transformer
//!
//! Strips server-managed fields from a workflow definition so the remote
//! accepts it as an update, and resets `settings` to an empty object.

use crate::transform::Transformer;
use eyre::Result;
use serde_json::{Map, Value};

/// Transformer that prepares a local workflow document for a PUT update.
///
/// n8n rejects updates that carry the fields it manages itself:
/// `id`, `active`, `createdAt`, `updatedAt`, `versionId`. The `settings`
/// object is also replaced with `{}` unconditionally, since exported
/// settings frequently reference instance-local values.
///
/// # Example
/// ```
/// use n8n_workflow_sync::transform::{PayloadSanitizer, Transformer};
/// use serde_json::json;
///
/// let sanitizer = PayloadSanitizer::server_managed_fields();
/// let input = json!({
///     "id": "old",
///     "active": true,
///     "name": "Invoice Flow",
///     "settings": {"timezone": "Europe/Berlin"}
/// });
///
/// let output = sanitizer.transform(input).unwrap();
/// assert_eq!(output, json!({"name": "Invoice Flow", "settings": {}}));
/// ```
pub struct PayloadSanitizer {
    fields: Vec<String>,
}

impl PayloadSanitizer {
    /// Create a sanitizer that drops the specified fields.
    pub fn new(fields: Vec<&str>) -> Self {
        Self {
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a sanitizer for the fields the n8n server manages itself.
    ///
    /// Drops: id, active, createdAt, updatedAt, versionId
    pub fn server_managed_fields() -> Self {
        Self::new(vec!["id", "active", "createdAt", "updatedAt", "versionId"])
    }
}

impl Transformer for PayloadSanitizer {
    type Input = Value;
    type Output = Value;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        if let Some(obj) = input.as_object_mut() {
            for field in &self.fields {
                obj.remove(field);
            }
            // Overwrites any settings the export carried
            obj.insert("settings".to_string(), Value::Object(Map::new()));
        }
        Ok(input)
    }
}
