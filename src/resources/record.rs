use crate::error::{LandfilesError, Result};
use serde_json::Value;
use std::fmt;

/// Raw resource JSON with the id and display fields resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRecord {
    kind: &'static str,
    id: String,
    display_field: Option<&'static str>,
    data: Value,
}

impl ApiRecord {
    /// Wrap `data`, failing if `id_field` is absent
    ///
    /// Ids may be sent as strings or numbers.
    pub fn new(
        kind: &'static str,
        data: Value,
        id_field: &str,
        display_field: Option<&'static str>,
    ) -> Result<Self> {
        let id = match data.get(id_field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(LandfilesError::missing_key(kind, id_field)),
        };

        Ok(Self {
            kind,
            id,
            display_field,
            data,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Display field value, or the id when the field is missing
    pub fn display_name(&self) -> String {
        self.display_field
            .and_then(|field| self.data.get(field))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| self.id.clone())
    }

    /// `Kind id (display)` rendering used in logs
    pub fn describe(&self) -> String {
        format!("{} {} ({})", self.kind, self.id, self.display_name())
    }
}

impl fmt::Display for ApiRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Get a required key from a response body
pub(crate) fn required<'a>(body: &'a Value, key: &str, context: &str) -> Result<&'a Value> {
    body.get(key)
        .ok_or_else(|| LandfilesError::missing_key(context, key))
}

/// Items of a JSON array body
pub(crate) fn array_items<'a>(body: &'a Value, context: &str) -> Result<&'a Vec<Value>> {
    body.as_array()
        .ok_or_else(|| LandfilesError::malformed(context, "expected a JSON array"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_and_display() {
        let record = ApiRecord::new(
            "Farm",
            json!({"uuid": "FA-1", "name": "Les Ormes"}),
            "uuid",
            Some("name"),
        )
        .unwrap();

        assert_eq!(record.id(), "FA-1");
        assert_eq!(record.to_string(), "Les Ormes");
        assert_eq!(record.describe(), "Farm FA-1 (Les Ormes)");
    }

    #[test]
    fn test_numeric_id_and_display_fallback() {
        let record = ApiRecord::new("Parcel", json!({"id": 42}), "id", Some("name")).unwrap();
        assert_eq!(record.id(), "42");
        assert_eq!(record.to_string(), "42");
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = ApiRecord::new("Group", json!({"name": "Coop"}), "uuid", Some("name")).unwrap_err();
        assert!(matches!(err, LandfilesError::MalformedRecord { .. }));
        assert!(err.to_string().contains("uuid"));
    }

    #[test]
    fn test_required_helpers() {
        let body = json!({"parcels": [1, 2]});
        assert!(required(&body, "parcels", "farm parcels").is_ok());
        assert!(required(&body, "farms", "group farms").is_err());
        assert!(array_items(&body, "body").is_err());
        assert_eq!(array_items(&body["parcels"], "parcels").unwrap().len(), 2);
    }
}
