//! Canonical JSON utilities (mp_io)
//! - Objects: keys sorted lexicographically (UTF-8 codepoint order)
//! - Arrays: order preserved (caller is responsible for stable ordering)
//! - Output: compact (no extra spaces, no trailing newline)
//!
//! Canonical bytes exist so digests of semantically-equal inputs agree no
//! matter how the source file was formatted.

use serde::Serialize;
use serde_json::Value;

use crate::IoResult;

/// Convert any serializable value to canonical JSON bytes.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> IoResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    let mut out = Vec::with_capacity(1024);
    write_canonical_value(&v, &mut out);
    Ok(out)
}

/// Canonical bytes of an already-parsed `serde_json::Value`.
pub fn value_to_canonical_bytes(v: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(1024);
    write_canonical_value(v, &mut out);
    out
}

fn write_canonical_value(v: &Value, out: &mut Vec<u8>) {
    match v {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => {
            // serde_json's escaping is deterministic.
            let quoted = serde_json::to_string(s).expect("string serialization is infallible");
            out.extend_from_slice(quoted.as_bytes());
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical_value(item, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push(b'{');
            for (i, k) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                let quoted = serde_json::to_string(k).expect("string serialization is infallible");
                out.extend_from_slice(quoted.as_bytes());
                out.push(b':');
                write_canonical_value(&map[k.as_str()], out);
            }
            out.push(b'}');
        }
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_and_output_compact() {
        let v = json!({"b": 1, "a": [2, {"z": null, "y": true}]});
        let bytes = value_to_canonical_bytes(&v);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"a":[2,{"y":true,"z":null}],"b":1}"#
        );
    }

    #[test]
    fn formatting_does_not_change_canonical_bytes() {
        let a: Value = serde_json::from_str(r#"{ "x" : 1, "y" : [ 1, 2 ] }"#).unwrap();
        let b: Value = serde_json::from_str("{\"y\":[1,2],\n  \"x\":1}").unwrap();
        assert_eq!(value_to_canonical_bytes(&a), value_to_canonical_bytes(&b));
    }

    #[test]
    fn serializable_structs_go_through_value() {
        #[derive(serde::Serialize)]
        struct S {
            b: u32,
            a: &'static str,
        }
        let bytes = to_canonical_bytes(&S { b: 7, a: "x" }).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"a":"x","b":7}"#);
    }
}
