use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{Result, ZaimError};
use crate::oauth::percent_encode;

/// Flat request parameters, already stringified.
///
/// The same map feeds both the signature and the bytes put on the wire,
/// so a value is formatted exactly once.
pub type Params = BTreeMap<String, String>;

/// Convert any serializable value into request parameters.
///
/// `null` (or `()`) gives no parameters, an object gives one parameter per
/// non-null field. Anything else cannot be flattened into a form.
pub fn to_params<P: Serialize>(param: P) -> Result<Params> {
    match serde_json::to_value(param)? {
        Value::Null => Ok(Params::new()),
        Value::Object(map) => Ok(map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), stringify(v)))
            .collect()),
        other => Err(ZaimError::RequestBuild(format!(
            "request parameters must be an object, got {}",
            other
        ))),
    }
}

/// Canonical string form of a parameter value.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                // f64's Display never switches to exponent notation
                n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
            }
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Encode parameters as an `application/x-www-form-urlencoded` body using
/// the same RFC 3986 escaping as the signature.
pub fn encode_form(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
