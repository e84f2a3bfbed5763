//! Soil Sample Inputs
//!
//! Input-side types for the assessment engine: the five named parameters,
//! the reading set itself, and the pass-through metadata. Readings arrive
//! from callers as untyped JSON; coercion here is deliberately lenient so
//! that the engine stays total. A field that fails to coerce is treated as
//! absent, never as an error.

use serde_json::Value;

/// One of the five assessed soil parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    N,
    P,
    K,
    Oc,
    Ph,
}

impl Parameter {
    /// Fixed walk order for problem collection and explainability.
    pub const IN_ORDER: [Parameter; 5] = [
        Parameter::N,
        Parameter::P,
        Parameter::K,
        Parameter::Oc,
        Parameter::Ph,
    ];

    /// Canonical wire name (matches the request/response JSON keys).
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::N => "N",
            Parameter::P => "P",
            Parameter::K => "K",
            Parameter::Oc => "OC",
            Parameter::Ph => "pH",
        }
    }

    /// N, P, K, and OC share the Low/Medium/High band scheme; pH does not.
    pub fn is_nutrient(&self) -> bool {
        !matches!(self, Parameter::Ph)
    }
}

/// One set of readings. Absence means "unknown", not zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoilSample {
    pub n: Option<f64>,
    pub p: Option<f64>,
    pub k: Option<f64>,
    pub oc: Option<f64>,
    pub ph: Option<f64>,
}

impl SoilSample {
    /// Extract readings from an untyped JSON object.
    ///
    /// JSON numbers and numeric strings coerce; null, booleans, arrays,
    /// objects, non-numeric strings, and non-finite values resolve to
    /// absent. This is the documented total-function behavior: malformed
    /// individual fields never surface as errors from the engine.
    pub fn from_json(body: &Value) -> Self {
        Self {
            n: coerce_reading(body.get("N")),
            p: coerce_reading(body.get("P")),
            k: coerce_reading(body.get("K")),
            oc: coerce_reading(body.get("OC")),
            ph: coerce_reading(body.get("pH")),
        }
    }

    /// Reading for one parameter.
    pub fn get(&self, param: Parameter) -> Option<f64> {
        match param {
            Parameter::N => self.n,
            Parameter::P => self.p,
            Parameter::K => self.k,
            Parameter::Oc => self.oc,
            Parameter::Ph => self.ph,
        }
    }

    /// True when no parameter carries a usable reading.
    pub fn is_empty(&self) -> bool {
        Parameter::IN_ORDER.iter().all(|p| self.get(*p).is_none())
    }
}

/// Lenient number coercion for a single reading field.
fn coerce_reading(field: Option<&Value>) -> Option<f64> {
    let value = match field? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// Optional request context. Accepted and carried through, but never
/// consulted for threshold selection: a single universal table applies
/// regardless of crop or lab method. Reserved for per-crop tuning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleMetadata {
    pub crop: Option<String>,
    pub soil_type: Option<String>,
    pub lab_method: Option<String>,
}

impl SampleMetadata {
    pub fn from_json(body: &Value) -> Self {
        Self {
            crop: get_string(body, "crop"),
            soil_type: get_string(body, "soil_type"),
            lab_method: get_string(body, "lab_method"),
        }
    }
}

fn get_string(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerces_numbers_and_numeric_strings() {
        let sample = SoilSample::from_json(&json!({
            "N": 120, "P": 8.5, "K": "85", "pH": " 5.8 ", "OC": 0.45
        }));
        assert_eq!(sample.n, Some(120.0));
        assert_eq!(sample.p, Some(8.5));
        assert_eq!(sample.k, Some(85.0));
        assert_eq!(sample.ph, Some(5.8));
        assert_eq!(sample.oc, Some(0.45));
    }

    #[test]
    fn test_malformed_fields_resolve_to_absent() {
        let sample = SoilSample::from_json(&json!({
            "N": "plenty", "P": null, "K": true, "pH": [7.0], "OC": {"v": 1}
        }));
        assert!(sample.is_empty());
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let sample = SoilSample::from_json(&json!({"pH": 6.5}));
        assert_eq!(sample.ph, Some(6.5));
        assert_eq!(sample.n, None);
        assert!(!sample.is_empty());
    }

    #[test]
    fn test_empty_object_is_empty_sample() {
        assert!(SoilSample::from_json(&json!({})).is_empty());
    }

    #[test]
    fn test_metadata_pass_through() {
        let meta = SampleMetadata::from_json(&json!({
            "crop": "rice", "soil_type": "loam", "N": 50
        }));
        assert_eq!(meta.crop.as_deref(), Some("rice"));
        assert_eq!(meta.soil_type.as_deref(), Some("loam"));
        assert_eq!(meta.lab_method, None);
    }

    #[test]
    fn test_parameter_wire_names() {
        let names: Vec<&str> = Parameter::IN_ORDER.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["N", "P", "K", "OC", "pH"]);
    }
}
