//! TOML output for PList values.
//!
//! Mapping from PList to TOML:
//!   - Value::Dict     -> TOML table (inline inside arrays)
//!   - Value::Array    -> TOML array
//!   - Value::String   -> TOML string
//!   - Value::Integer  -> TOML integer
//!   - Value::Real     -> TOML float
//!   - Value::Bool     -> TOML boolean
//!   - Value::Date     -> TOML offset datetime
//!   - Value::Data     -> TOML string holding the base64 text
//!
//! Lossy edges:
//!   - TOML has no null type; an unset `<date/>` causes an error.
//!   - TOML requires the top-level value to be a table; non-dict roots error.

use libplist::{Dict, Value};
use toml_edit::{DocumentMut, Formatted, InlineTable, Item, Table};

/// Encode a PList Value as a TOML string.
pub fn encode(value: &Value) -> Result<String, String> {
    match value {
        Value::Dict(dict) => {
            let table = dict_to_table(dict)?;
            let mut doc = DocumentMut::new();
            for (key, item) in table.iter() {
                doc[key] = item.clone();
            }
            Ok(doc.to_string())
        }
        other => Err(format!(
            "TOML requires the top-level value to be a dict, found {}",
            other.kind()
        )),
    }
}

fn dict_to_table(dict: &Dict) -> Result<Table, String> {
    let mut table = Table::new();
    for (key, value) in dict.iter() {
        let item = match value {
            Value::Dict(inner) => Item::Table(dict_to_table(inner)?),
            other => Item::Value(value_to_toml(other)?),
        };
        table.insert(key, item);
    }
    Ok(table)
}

fn value_to_toml(value: &Value) -> Result<toml_edit::Value, String> {
    match value {
        Value::Bool(b) => Ok(toml_edit::Value::Boolean(Formatted::new(*b))),
        Value::Integer(n) => Ok(toml_edit::Value::Integer(Formatted::new(*n))),
        Value::Real(f) => Ok(toml_edit::Value::Float(Formatted::new(*f))),
        Value::String(s) => Ok(toml_edit::Value::String(Formatted::new(s.clone()))),
        Value::Date(Some(d)) => {
            let datetime: toml_edit::Datetime = d
                .to_rfc3339()
                .parse()
                .map_err(|e| format!("Cannot express date {} in TOML: {}", d, e))?;
            Ok(toml_edit::Value::Datetime(Formatted::new(datetime)))
        }
        Value::Date(None) => Err("TOML has no null type for an unset <date>".to_string()),
        Value::Data(d) => Ok(toml_edit::Value::String(Formatted::new(
            d.as_base64().chars().filter(|c| !c.is_whitespace()).collect(),
        ))),
        Value::Array(arr) => {
            let mut toml_arr = toml_edit::Array::new();
            for item in arr {
                toml_arr.push(value_to_toml(item)?);
            }
            Ok(toml_edit::Value::Array(toml_arr))
        }
        Value::Dict(dict) => {
            let mut inline = InlineTable::new();
            for (key, item) in dict.iter() {
                inline.insert(key, value_to_toml(item)?);
            }
            Ok(toml_edit::Value::InlineTable(inline))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_dict() {
        let dict: Dict = [("name", Value::from("x")), ("n", Value::from(1))]
            .into_iter()
            .collect();
        assert_eq!(encode(&Value::from(dict)).unwrap(), "n = 1\nname = \"x\"\n");
    }

    #[test]
    fn non_dict_root_is_rejected() {
        let err = encode(&Value::from(vec![Value::from(1)])).unwrap_err();
        assert!(err.contains("found array"));
    }

    #[test]
    fn unset_date_is_rejected() {
        let dict: Dict = [("when", Value::Date(None))].into_iter().collect();
        assert!(encode(&Value::from(dict)).is_err());
    }
}
