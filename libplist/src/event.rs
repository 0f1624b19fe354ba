//! Owned parse events.
//!
//! This is the event contract the tree builder consumes: one start per
//! element, zero or more text runs, one end per element, bracketed by
//! document start and end. Any XML pull parser or SAX-style library can be
//! adapted to it; [`crate::reader`] does so for `quick-xml`.
//!
//! For a plist such as `<plist><array><integer>1</integer></array></plist>`
//! the sequence is:
//!
//! ```text
//! DocumentStart
//! ElementStart { name: "plist" }
//! ElementStart { name: "array" }
//! ElementStart { name: "integer" }
//! Characters("1")
//! ElementEnd { name: "integer" }
//! ElementEnd { name: "array" }
//! ElementEnd { name: "plist" }
//! DocumentEnd
//! ```

use crate::builder::TreeBuilder;
use crate::error::{ParseError, Result};
use crate::value::Value;

/// A single parse event.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    DocumentStart,
    ElementStart {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// A run of character data. Consecutive runs belong to the same text.
    Characters(String),
    ElementEnd {
        name: String,
    },
    DocumentEnd,
}

impl Event {
    /// Start of an element with no attributes.
    pub fn start(name: &str) -> Self {
        Event::ElementStart {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    /// End of an element.
    pub fn end(name: &str) -> Self {
        Event::ElementEnd {
            name: name.to_string(),
        }
    }

    /// A text run.
    pub fn text(text: &str) -> Self {
        Event::Characters(text.to_string())
    }
}

/// The event sequence an XML source would produce for a document whose root
/// value is `root`.
///
/// Data is emitted as its stored base64 text and dates as RFC 3339, so
/// feeding the result back through a [`TreeBuilder`] yields an equal tree.
/// The one exception is whitespace: the builder trims leaf text, so a string
/// or key with leading or trailing whitespace comes back trimmed.
pub fn events_for(root: &Value) -> Vec<Event> {
    let mut events = vec![
        Event::DocumentStart,
        Event::ElementStart {
            name: "plist".to_string(),
            attributes: vec![("version".to_string(), "1.0".to_string())],
        },
    ];
    push_value(&mut events, root);
    events.push(Event::end("plist"));
    events.push(Event::DocumentEnd);
    events
}

fn push_value(events: &mut Vec<Event>, value: &Value) {
    match value {
        Value::Dict(dict) => {
            events.push(Event::start("dict"));
            for (key, child) in dict.iter() {
                push_leaf(events, "key", Some(key));
                push_value(events, child);
            }
            events.push(Event::end("dict"));
        }
        Value::Array(arr) => {
            events.push(Event::start("array"));
            for child in arr {
                push_value(events, child);
            }
            events.push(Event::end("array"));
        }
        Value::String(s) => push_leaf(events, "string", Some(s)),
        Value::Integer(n) => push_leaf(events, "integer", Some(&n.to_string())),
        Value::Real(f) => push_leaf(events, "real", Some(&f.to_string())),
        Value::Bool(true) => push_leaf(events, "true", None),
        Value::Bool(false) => push_leaf(events, "false", None),
        Value::Date(Some(d)) => push_leaf(events, "date", Some(&d.to_rfc3339())),
        Value::Date(None) => push_leaf(events, "date", None),
        Value::Data(d) => push_leaf(events, "data", Some(d.as_base64())),
    }
}

fn push_leaf(events: &mut Vec<Event>, name: &str, text: Option<&str>) {
    events.push(Event::start(name));
    if let Some(text) = text {
        events.push(Event::text(text));
    }
    events.push(Event::end(name));
}

/// Drive a fresh builder with `events` and return the finished root.
pub fn build_from_events<'e>(events: impl IntoIterator<Item = &'e Event>) -> Result<Value> {
    let mut builder = TreeBuilder::new();
    for event in events {
        builder.handle_event(event)?;
    }
    builder.finish()
}

/// Same as [`build_from_events`] but reports which event failed.
pub fn build_from_events_indexed<'e>(
    events: impl IntoIterator<Item = &'e Event>,
) -> std::result::Result<Value, (usize, ParseError)> {
    let mut builder = TreeBuilder::new();
    let mut count = 0;
    for (i, event) in events.into_iter().enumerate() {
        builder.handle_event(event).map_err(|e| (i, e))?;
        count = i + 1;
    }
    builder.finish().map_err(|e| (count, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Dict;

    #[test]
    fn bare_scalar_sequence() {
        let events = events_for(&Value::from(1));
        assert_eq!(events.len(), 7);
        assert_eq!(events[2], Event::start("integer"));
        assert_eq!(events[3], Event::text("1"));
    }

    #[test]
    fn dict_keys_precede_values() {
        let dict: Dict = [("k", Value::from(true))].into_iter().collect();
        let events = events_for(&Value::from(dict));
        assert_eq!(
            &events[2..8],
            &[
                Event::start("dict"),
                Event::start("key"),
                Event::text("k"),
                Event::end("key"),
                Event::start("true"),
                Event::end("true"),
            ]
        );
    }

    #[test]
    fn replay_reproduces_tree() {
        let dict: Dict = [
            ("name", Value::from("plist")),
            ("list", Value::from(vec![Value::from(1), Value::from(2.5)])),
        ]
        .into_iter()
        .collect();
        let root = Value::from(dict);
        assert_eq!(build_from_events(&events_for(&root)), Ok(root));
    }

    #[test]
    fn indexed_failure_points_at_event() {
        let events = [Event::DocumentStart, Event::start("integer")];
        let (index, err) = build_from_events_indexed(&events).unwrap_err();
        assert_eq!(index, 1);
        assert!(err.is_structural());
    }

    #[test]
    fn replay_trims_padded_text() {
        let root: Dict = [(" k ", Value::from("  padded  "))].into_iter().collect();
        let replayed = build_from_events(&events_for(&Value::from(root))).unwrap();
        let expected: Dict = [("k", Value::from("padded"))].into_iter().collect();
        assert_eq!(replayed, Value::from(expected));
    }
}
