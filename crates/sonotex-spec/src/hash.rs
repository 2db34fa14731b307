//! Canonical hashing of configurations.
//!
//! A run is labelled by `hex(BLAKE3(canonical_json(config)))`, where the
//! canonical form sorts object keys and strips whitespace, so two configs
//! that differ only in key order or formatting share a hash.

use crate::config::RenderConfig;
use crate::error::SpecError;

/// Computes the canonical BLAKE3 hash of a configuration.
///
/// # Example
/// ```
/// use sonotex_spec::{canonical_config_hash, RenderConfig};
///
/// let hash = canonical_config_hash(&RenderConfig::default()).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_config_hash(config: &RenderConfig) -> Result<String, SpecError> {
    let value = config.to_value()?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_value(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

fn canonicalize_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_number(n),
        // serde_json's string encoding is already minimal and deterministic.
        serde_json::Value::String(s) => serde_json::Value::String(s.clone()).to_string(),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_value).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| {
                    format!(
                        "{}:{}",
                        serde_json::Value::String(k.clone()),
                        canonicalize_value(v)
                    )
                })
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

/// Integer-valued floats print without a fractional part so `40` and `40.0` agree.
fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if !f.is_finite() => "null".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{}", f),
        None => "null".to_string(),
    }
}
