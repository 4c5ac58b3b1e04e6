//! Canonical serialization for snapshot equality.
//!
//! Object keys are emitted in sorted (byte-wise) order at every nesting level,
//! array elements keep their order, and scalars use the same compact text
//! `serde_json` produces. Two snapshots are equal iff their canonical strings
//! are byte-identical, so `1` and `1.0` differ and so does `"A"` vs `"a"`.
//!
//! This encoding is only used for comparison. Records on disk use the
//! ordinary pretty-printed form.

use serde_json::Value;

/// Canonical string for a snapshot. An absent snapshot encodes as `null`.
pub fn stable_stringify(value: Option<&Value>) -> String {
    let mut out = String::new();
    match value {
        Some(value) => write_canonical(value, &mut out),
        None => out.push_str("null"),
    }
    out
}

/// Compare two snapshots under the canonical encoding.
pub fn canonical_eq(a: Option<&Value>, b: Option<&Value>) -> bool {
    stable_stringify(a) == stable_stringify(b)
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

            out.push('{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push(':');
                write_canonical(value, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify_sorts_object_keys() {
        let value = json!({"b": 2, "a": 1, "c": {"z": true, "y": null}});
        assert_eq!(
            stable_stringify(Some(&value)),
            r#"{"a":1,"b":2,"c":{"y":null,"z":true}}"#
        );
    }

    #[test]
    fn test_stringify_preserves_array_order() {
        let value = json!([3, 1, 2]);
        assert_eq!(stable_stringify(Some(&value)), "[3,1,2]");
    }

    #[test]
    fn test_stringify_sorts_inside_arrays() {
        let value = json!([{"b": 1, "a": 2}]);
        assert_eq!(stable_stringify(Some(&value)), r#"[{"a":2,"b":1}]"#);
    }

    #[test]
    fn test_stringify_absent_is_null() {
        assert_eq!(stable_stringify(None), "null");
    }

    #[test]
    fn test_stringify_escapes_keys_and_strings() {
        let value = json!({"quote\"key": "line\nbreak"});
        assert_eq!(
            stable_stringify(Some(&value)),
            r#"{"quote\"key":"line\nbreak"}"#
        );
    }

    #[test]
    fn test_canonical_eq_ignores_insertion_order() {
        let a: Value = serde_json::from_str(r#"{"a":1,"b":{"x":1,"y":2}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b":{"y":2,"x":1},"a":1}"#).unwrap();
        assert!(canonical_eq(Some(&a), Some(&b)));
    }

    #[test]
    fn test_canonical_eq_is_literal() {
        assert!(!canonical_eq(Some(&json!([1, 2])), Some(&json!([2, 1]))));
        assert!(!canonical_eq(Some(&json!(1)), Some(&json!(1.0))));
        assert!(!canonical_eq(Some(&json!("A")), Some(&json!("a"))));
        assert!(!canonical_eq(None, Some(&json!({}))));
    }
}
