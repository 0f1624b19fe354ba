//! XML event source backed by `quick-xml`.

use crate::builder::TreeBuilder;
use crate::error::{ParseContext, ParseError, Result};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;
use std::str;
use tracing::trace;

/// Feed every event of `input` to `builder`, from document start to document
/// end. Errors carry a location suffix when `ctx` names a file.
///
/// End tags are matched by the builder, not by `quick-xml`.
pub fn read_into(input: &str, ctx: &ParseContext, builder: &mut TreeBuilder<'_>) -> Result<()> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().check_end_names = false;
    builder.document_start();

    loop {
        let offset = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                let (line, col) = line_col(input, reader.error_position() as usize);
                return Err(ParseError::xml(e).with_location(ctx, line, col));
            }
        };
        let locate = |err: ParseError| {
            let (line, col) = line_col(input, offset);
            err.with_location(ctx, line, col)
        };

        match event {
            XmlEvent::Start(ref e) => {
                let (name, attributes) = start_parts(e).map_err(locate)?;
                builder.element_start(&name, &attributes).map_err(locate)?;
            }
            XmlEvent::Empty(ref e) => {
                let (name, attributes) = start_parts(e).map_err(locate)?;
                builder.element_start(&name, &attributes).map_err(locate)?;
                builder.element_end(&name).map_err(locate)?;
            }
            XmlEvent::End(ref e) => {
                let local = e.local_name();
                let name = str::from_utf8(local.as_ref())
                    .map_err(ParseError::xml)
                    .map_err(locate)?;
                builder.element_end(name).map_err(locate)?;
            }
            XmlEvent::Text(ref e) => {
                let text = e.unescape().map_err(ParseError::xml).map_err(locate)?;
                builder.characters(&text);
            }
            XmlEvent::CData(e) => {
                let raw = e.into_inner();
                let text = str::from_utf8(&raw)
                    .map_err(ParseError::xml)
                    .map_err(locate)?;
                builder.characters(text);
            }
            XmlEvent::Eof => {
                trace!(offset, "end of input");
                return builder.document_end().map_err(locate);
            }
            // Declarations, comments, processing instructions, DOCTYPE.
            _ => {}
        }
    }
}

fn start_parts(e: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>)> {
    let local = e.local_name();
    let name = str::from_utf8(local.as_ref())
        .map_err(ParseError::xml)?
        .to_string();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(ParseError::xml)?;
        let key = str::from_utf8(attr.key.local_name().as_ref())
            .map_err(ParseError::xml)?
            .to_string();
        let value = attr.unescape_value().map_err(ParseError::xml)?.into_owned();
        attributes.push((key, value));
    }
    Ok((name, attributes))
}

/// Zero-based line and column of a byte offset. Columns count characters.
fn line_col(input: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(input.len());
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let before = &input[..end];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn read(input: &str, filename: Option<&str>) -> Result<Value> {
        let mut builder = TreeBuilder::new();
        read_into(input, &ParseContext::new(filename), &mut builder)?;
        builder.finish()
    }

    #[test]
    fn line_and_column() {
        assert_eq!(line_col("abc", 0), (0, 0));
        assert_eq!(line_col("ab\ncd", 4), (1, 1));
        assert_eq!(line_col("é\nx", 3), (1, 0));
        assert_eq!(line_col("ab", 99), (0, 2));
    }

    #[test]
    fn ignores_prolog_and_comments() {
        let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<!-- generated -->
<plist version="1.0"><string>ok</string></plist>
"#;
        assert_eq!(read(input, None), Ok(Value::from("ok")));
    }

    #[test]
    fn entities_and_cdata() {
        let input = "<plist><array><string>a &amp; b</string>\
                     <string><![CDATA[<raw>]]></string></array></plist>";
        assert_eq!(
            read(input, None),
            Ok(Value::from(vec![Value::from("a & b"), Value::from("<raw>")]))
        );
    }

    #[test]
    fn empty_elements_start_and_end() {
        let input = "<plist><dict><key>on</key><true/><key>when</key><date/></dict></plist>";
        let root = read(input, None).unwrap();
        let dict = root.as_dict().unwrap();
        assert_eq!(dict.get_bool("on"), Ok(Some(true)));
        assert_eq!(dict.get("when"), Some(&Value::Date(None)));
    }

    #[test]
    fn namespace_prefix_is_ignored() {
        let input = r#"<p:plist xmlns:p="urn:x"><p:integer>7</p:integer></p:plist>"#;
        assert_eq!(read(input, None), Ok(Value::Integer(7)));
    }

    #[test]
    fn structural_error_is_located() {
        let input = "<plist>\n  <dict>\n    <string>x</string>\n  </dict>\n</plist>";
        let err = read(input, Some("bad.plist")).unwrap_err();
        assert!(err.is_structural());
        assert_eq!(
            err.to_string(),
            "Values inside a <dict> need a preceding <key> (<string> at depth 2) at 3:5 of <bad.plist>"
        );
    }

    #[test]
    fn malformed_xml() {
        let err = read("<plist><string>&bogus;</string></plist>", None).unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }));
    }

    #[test]
    fn mismatched_end_tag_is_structural() {
        let input = "<plist>\n  <array>\n    <integer>1</integer>\n</plist>";
        let err = read(input, Some("cut.plist")).unwrap_err();
        assert!(err.is_structural());
        assert_eq!(
            err.to_string(),
            "Expected </array>, found </plist> (<plist> at depth 2) at 4:1 of <cut.plist>"
        );
    }

    #[test]
    fn unknown_element_end_tags_are_checked() {
        let err = read("<plist><note><integer>7</integer></plist>", None).unwrap_err();
        assert_eq!(
            err,
            ParseError::structural("plist", 2, "Expected </note>, found </plist>")
        );
        assert_eq!(
            read("<plist><note><integer>7</integer></NOTE></plist>", None),
            Ok(Value::Integer(7))
        );
    }

    #[test]
    fn missing_plist_end() {
        assert!(read("<plist><integer>1</integer>", None).is_err());
    }
}
