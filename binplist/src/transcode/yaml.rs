//! YAML output for PList values.
//!
//! Mapping from PList to YAML:
//!   - Value::Dict     -> YAML mapping (keys in lexicographic order)
//!   - Value::Array    -> YAML sequence
//!   - Value::String   -> YAML string
//!   - Value::Integer  -> YAML integer
//!   - Value::Real     -> YAML float (including .nan, .inf, -.inf)
//!   - Value::Bool     -> YAML bool
//!   - Value::Date     -> YAML `!!timestamp` (RFC 3339), or null when unset
//!   - Value::Data     -> YAML `!!binary` (base64 text as stored)

use libplist::Value;

/// Encode a PList Value as a YAML string.
pub fn encode(value: &Value) -> Result<String, String> {
    let yaml_value = value_to_yaml(value);
    serde_yaml::to_string(&yaml_value).map_err(|e| format!("YAML encode error: {}", e))
}

fn tagged(tag: &str, text: String) -> serde_yaml::Value {
    serde_yaml::Value::Tagged(Box::new(serde_yaml::value::TaggedValue {
        tag: serde_yaml::value::Tag::new(tag),
        value: serde_yaml::Value::String(text),
    }))
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Integer(n) => serde_yaml::Value::Number(serde_yaml::Number::from(*n)),
        Value::Real(f) => serde_yaml::Value::Number(serde_yaml::Number::from(*f)),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Date(Some(d)) => tagged("!!timestamp", d.to_rfc3339()),
        Value::Date(None) => serde_yaml::Value::Null,
        // Stored text may carry line breaks from the source document.
        Value::Data(d) => tagged(
            "!!binary",
            d.as_base64().chars().filter(|c| !c.is_whitespace()).collect(),
        ),
        Value::Array(arr) => serde_yaml::Value::Sequence(arr.iter().map(value_to_yaml).collect()),
        Value::Dict(dict) => {
            let mut map = serde_yaml::Mapping::new();
            for (k, v) in dict.iter() {
                map.insert(serde_yaml::Value::String(k.to_string()), value_to_yaml(v));
            }
            serde_yaml::Value::Mapping(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libplist::{Data, Dict};

    #[test]
    fn mapping_in_key_order() {
        let dict: Dict = [("b", Value::from(2)), ("a", Value::from("x"))]
            .into_iter()
            .collect();
        assert_eq!(encode(&Value::from(dict)).unwrap(), "a: x\nb: 2\n");
    }

    #[test]
    fn binary_tag() {
        let out = encode(&Value::Data(Data::from_base64("AAEC\n  AwQ="))).unwrap();
        assert!(out.contains("binary"));
        assert!(out.contains("AAECAwQ="));
    }

    #[test]
    fn unset_date_is_null() {
        assert_eq!(encode(&Value::Date(None)).unwrap(), "null\n");
    }
}
