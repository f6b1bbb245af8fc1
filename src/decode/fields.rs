//! Explicit per-field conversions for loosely typed provider JSON.
//!
//! Providers disagree on how they encode the same field (an id may arrive as
//! `1610612737`, `1610612737.0` or `"1610612737"`), so every mapper goes through
//! these helpers instead of assuming one representation.

use serde_json::{Map, Value};

/// Integer from a number, an integral float, or a numeric string
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            // Integral floats like 12.0. Anything else is not an integer.
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

pub fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Text rendering of a scalar. `null`, arrays and objects have none.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(_) => as_int(value).map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "y" | "yes" => Some(true),
            "false" | "0" | "n" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Best-effort string for a header cell: strings verbatim, anything else as JSON text
pub fn header_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Field accessors over a JSON object (a decoded record or a nested provider object).
/// Missing or mistyped fields come back as `None`; callers choose the default.
pub trait FieldExt {
    fn field(&self, key: &str) -> Option<&Value>;

    fn int(&self, key: &str) -> Option<i64> {
        self.field(key).and_then(as_int)
    }

    fn float(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(as_float)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.field(key).and_then(as_text)
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        self.field(key).and_then(as_bool)
    }

    fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.field(key).and_then(Value::as_object)
    }

    fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.field(key).and_then(Value::as_array)
    }

    fn int_or_zero(&self, key: &str) -> i64 {
        self.int(key).unwrap_or_default()
    }

    fn float_or_zero(&self, key: &str) -> f64 {
        self.float(key).unwrap_or_default()
    }

    fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    /// Text at a dotted path through nested objects, e.g. `"firstName.default"`
    fn text_at(&self, path: &str) -> Option<String> {
        self.value_at(path).and_then(as_text)
    }

    fn int_at(&self, path: &str) -> Option<i64> {
        self.value_at(path).and_then(as_int)
    }

    fn value_at(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.field(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

impl FieldExt for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}
