use serde_json::Value;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// One typed data point captured in an observation
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    /// Stable measure type code, e.g. `COLL_00070`
    pub type_code: String,
    pub label: String,
    /// Raw scalar value as sent by the API
    pub value: Value,
    /// Semantic kind of `value` (wire field `type`)
    pub value_type: String,
    /// Pre-formatted display value, preferred over `value` when present
    pub value_label: Option<String>,
}

impl Measure {
    /// Display string for the value: `value_label` if non-empty, else the raw value
    pub fn value_str(&self) -> String {
        match self.value_label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => match &self.value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            },
        }
    }

    pub fn type_def(&self) -> MeasureTypeDef {
        MeasureTypeDef::new(self.type_code.clone(), self.label.clone())
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.label, self.value_str())
    }
}

/// Measure type descriptor
///
/// Identity is the type code alone: two defs with the same code and different
/// labels are equal, hash identically and collapse to one entry in a set.
#[derive(Debug, Clone)]
pub struct MeasureTypeDef {
    pub type_code: String,
    pub label: String,
}

impl MeasureTypeDef {
    pub fn new(type_code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            type_code: type_code.into(),
            label: label.into(),
        }
    }
}

impl PartialEq for MeasureTypeDef {
    fn eq(&self, other: &Self) -> bool {
        self.type_code == other.type_code
    }
}

impl Eq for MeasureTypeDef {}

impl Hash for MeasureTypeDef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_code.hash(state);
    }
}

impl PartialOrd for MeasureTypeDef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MeasureTypeDef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.type_code.cmp(&other.type_code)
    }
}

impl fmt::Display for MeasureTypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.type_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::{BTreeSet, HashSet};

    fn rain(value: Value, value_label: Option<&str>) -> Measure {
        Measure {
            type_code: "COLL_00070".to_string(),
            label: "Rain".to_string(),
            value,
            value_type: "float".to_string(),
            value_label: value_label.map(str::to_string),
        }
    }

    #[test]
    fn test_value_label_takes_precedence() {
        assert_eq!(rain(json!(12.3), Some("12.3 mm")).to_string(), "Rain = 12.3 mm");
        assert_eq!(rain(json!(12.3), None).to_string(), "Rain = 12.3");
        // Empty label falls back to the raw value
        assert_eq!(rain(json!(12.3), Some("")).value_str(), "12.3");
    }

    #[test]
    fn test_raw_value_rendering() {
        assert_eq!(rain(json!("dry"), None).value_str(), "dry");
        assert_eq!(rain(json!(true), None).value_str(), "true");
        assert_eq!(rain(json!(4), None).value_str(), "4");
        assert_eq!(rain(Value::Null, None).value_str(), "");
    }

    #[test]
    fn test_type_def_identity_ignores_label() {
        let a = MeasureTypeDef::new("COLL_00070", "Rain");
        let b = MeasureTypeDef::new("COLL_00070", "Rainfall");
        let c = MeasureTypeDef::new("COLL_00404", "Rain");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let hashed: HashSet<_> = [a.clone(), b.clone(), c.clone()].into_iter().collect();
        assert_eq!(hashed.len(), 2);

        let ordered: BTreeSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(ordered.len(), 2);
        assert!(ordered.contains(&MeasureTypeDef::new("COLL_00070", "")));
    }

    #[test]
    fn test_type_def_from_measure() {
        let def = rain(json!(1.0), None).type_def();
        assert_eq!(def.type_code, "COLL_00070");
        assert_eq!(def.label, "Rain");
        assert_eq!(def.to_string(), "Rain (COLL_00070)");
    }
}
