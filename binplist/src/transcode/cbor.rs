//! CBOR output for PList values.
//!
//! Mapping from PList to CBOR:
//!   - Value::Dict     -> CBOR map (determinate length, text keys in key order)
//!   - Value::Array    -> CBOR array (determinate length)
//!   - Value::String   -> CBOR text string
//!   - Value::Integer  -> CBOR integer (smallest encoding that fits)
//!   - Value::Real     -> CBOR float64 (always 9 bytes, never downgraded)
//!   - Value::Bool     -> CBOR simple values 20/21
//!   - Value::Date     -> tag 0 over an RFC 3339 text string, or null when unset
//!   - Value::Data     -> CBOR byte string (decoded from base64)

use ciborium::value::Value as CborValue;
use libplist::Value;
use std::fmt::Write as FmtWrite;

// ---------------------------------------------------------------------------
// Encode (PList -> CBOR)
//
// Written directly rather than through ciborium's Value type, which
// downgrades float64 to float16/float32 when the value fits.
// ---------------------------------------------------------------------------

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;
const MAJOR_TAG: u8 = 6;

/// Tag 0: standard date/time string (RFC 8949 §3.4.1).
const TAG_DATETIME: u64 = 0;

/// Encode a PList Value as CBOR bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    write_value(&mut buf, value)?;
    Ok(buf)
}

fn write_value(buf: &mut Vec<u8>, value: &Value) -> Result<(), String> {
    match value {
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Integer(n) => write_integer(buf, *n),
        Value::Real(f) => {
            buf.push(0xfb);
            buf.extend_from_slice(&f.to_be_bytes());
        }
        Value::String(s) => write_text(buf, s),
        Value::Date(Some(d)) => {
            write_type_and_length(buf, MAJOR_TAG, TAG_DATETIME);
            write_text(buf, &d.to_rfc3339());
        }
        Value::Date(None) => buf.push(0xf6),
        Value::Data(d) => {
            let bytes = d
                .decode()
                .map_err(|e| format!("invalid base64 in <data>: {}", e))?;
            write_type_and_length(buf, MAJOR_BYTES, bytes.len() as u64);
            buf.extend_from_slice(&bytes);
        }
        Value::Array(arr) => {
            write_type_and_length(buf, MAJOR_ARRAY, arr.len() as u64);
            for item in arr {
                write_value(buf, item)?;
            }
        }
        Value::Dict(dict) => {
            write_type_and_length(buf, MAJOR_MAP, dict.len() as u64);
            for (key, item) in dict.iter() {
                write_text(buf, key);
                write_value(buf, item)?;
            }
        }
    }
    Ok(())
}

fn write_text(buf: &mut Vec<u8>, s: &str) {
    write_type_and_length(buf, MAJOR_TEXT, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Write a CBOR major type + argument, using the shortest argument form.
fn write_type_and_length(buf: &mut Vec<u8>, major: u8, val: u64) {
    let high = major << 5;
    match val {
        0..=23 => buf.push(high | val as u8),
        24..=0xff => {
            buf.push(high | 24);
            buf.push(val as u8);
        }
        0x100..=0xffff => {
            buf.push(high | 25);
            buf.extend_from_slice(&(val as u16).to_be_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(high | 26);
            buf.extend_from_slice(&(val as u32).to_be_bytes());
        }
        _ => {
            buf.push(high | 27);
            buf.extend_from_slice(&val.to_be_bytes());
        }
    }
}

/// Major 0 carries `n`; major 1 carries `-1 - n`.
fn write_integer(buf: &mut Vec<u8>, n: i64) {
    if n < 0 {
        write_type_and_length(buf, MAJOR_NEGATIVE, (-1 - n) as u64);
    } else {
        write_type_and_length(buf, MAJOR_UNSIGNED, n as u64);
    }
}

// ---------------------------------------------------------------------------
// Diagnostic Notation (CBOR -> human-readable text, RFC 8949 §8)
// ---------------------------------------------------------------------------

/// Render CBOR bytes as diagnostic notation.
///
/// Renders from the CBOR binary, not from PList values, so it shows the
/// actual wire encoding.
pub fn diagnostic(input: &[u8]) -> Result<String, String> {
    let cbor_value: CborValue =
        ciborium::de::from_reader(input).map_err(|e| format!("CBOR decode error: {}", e))?;
    let mut out = String::new();
    diag_value(&mut out, &cbor_value, 0)?;
    out.push('\n');
    Ok(out)
}

fn diag_value(out: &mut String, val: &CborValue, indent: usize) -> Result<(), String> {
    match val {
        CborValue::Null => out.push_str("null"),
        CborValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        CborValue::Integer(i) => {
            let n: i128 = (*i).into();
            write!(out, "{}", n).map_err(|e| e.to_string())?;
        }
        CborValue::Float(f) => diag_float(out, *f),
        CborValue::Text(s) => diag_text(out, s),
        CborValue::Bytes(b) => {
            out.push_str("h'");
            for byte in b {
                write!(out, "{:02x}", byte).map_err(|e| e.to_string())?;
            }
            out.push('\'');
        }
        CborValue::Array(arr) => diag_array(out, arr, indent)?,
        CborValue::Map(pairs) => diag_map(out, pairs, indent)?,
        CborValue::Tag(tag, inner) => {
            write!(out, "{}(", tag).map_err(|e| e.to_string())?;
            diag_value(out, inner, indent)?;
            out.push(')');
        }
        other => return Err(format!("unexpected CBOR item {:?}", other)),
    }
    Ok(())
}

fn diag_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("NaN");
    } else if f.is_infinite() {
        out.push_str(if f.is_sign_positive() { "Infinity" } else { "-Infinity" });
    } else {
        let s = format!("{:?}", f);
        out.push_str(&s);
    }
}

fn diag_text(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn diag_array(out: &mut String, arr: &[CborValue], indent: usize) -> Result<(), String> {
    if arr.is_empty() {
        out.push_str("[]");
        return Ok(());
    }
    if arr.len() <= 5 && arr.iter().all(is_simple_value) {
        out.push('[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            diag_value(out, item, indent)?;
        }
        out.push(']');
        return Ok(());
    }
    out.push_str("[\n");
    for (i, item) in arr.iter().enumerate() {
        push_indent(out, indent + 2);
        diag_value(out, item, indent + 2)?;
        if i + 1 < arr.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push(']');
    Ok(())
}

fn diag_map(out: &mut String, pairs: &[(CborValue, CborValue)], indent: usize) -> Result<(), String> {
    if pairs.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push_str("{\n");
    for (i, (k, v)) in pairs.iter().enumerate() {
        push_indent(out, indent + 2);
        diag_value(out, k, indent + 2)?;
        out.push_str(": ");
        diag_value(out, v, indent + 2)?;
        if i + 1 < pairs.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push('}');
    Ok(())
}

fn is_simple_value(val: &CborValue) -> bool {
    matches!(
        val,
        CborValue::Null
            | CborValue::Bool(_)
            | CborValue::Integer(_)
            | CborValue::Float(_)
            | CborValue::Text(_)
            | CborValue::Bytes(_)
    )
}
