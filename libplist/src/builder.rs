//! Tree builder: the stack machine that turns element and text events into a
//! `Value` tree.
//!
//! The builder is push-driven. An event source calls, in document order:
//!
//! - [`TreeBuilder::document_start`] once,
//! - [`TreeBuilder::element_start`] for every start tag,
//! - [`TreeBuilder::characters`] for every text run,
//! - [`TreeBuilder::element_end`] for every end tag,
//! - [`TreeBuilder::document_end`] once.
//!
//! Open `<dict>` and `<array>` elements live on a context stack; the top of
//! the stack is the only container that can receive children. Scalars are
//! built at their end tag from the text collected since their start tag.
//!
//! # State
//!
//! ```text
//! Unopened --<plist>--> Open --</plist>--> Closed
//! ```
//!
//! A builder handles one `<plist>` per document. `document_start` resets it
//! for the next one.

use crate::date::parse_date;
use crate::dict::Dict;
use crate::error::{ParseError, Result};
use crate::event::Event;
use crate::value::{Array, Data, Value};
use tracing::{debug, trace};

// ============================================================================
// Tags
// ============================================================================

/// Element names of the PList vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Plist,
    Dict,
    Array,
    Key,
    String,
    Integer,
    Real,
    Date,
    Data,
    True,
    False,
}

impl Tag {
    const ALL: [Tag; 11] = [
        Tag::Plist,
        Tag::Dict,
        Tag::Array,
        Tag::Key,
        Tag::String,
        Tag::Integer,
        Tag::Real,
        Tag::Date,
        Tag::Data,
        Tag::True,
        Tag::False,
    ];

    /// Look up a tag by element name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL
            .into_iter()
            .find(|tag| name.eq_ignore_ascii_case(tag.name()))
    }

    /// The canonical element name.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Plist => "plist",
            Tag::Dict => "dict",
            Tag::Array => "array",
            Tag::Key => "key",
            Tag::String => "string",
            Tag::Integer => "integer",
            Tag::Real => "real",
            Tag::Date => "date",
            Tag::Data => "data",
            Tag::True => "true",
            Tag::False => "false",
        }
    }

    /// `dict` or `array`.
    pub fn is_container(self) -> bool {
        matches!(self, Tag::Dict | Tag::Array)
    }

    /// Elements whose content is text: `key` and every scalar value.
    pub fn is_leaf(self) -> bool {
        !self.is_container() && self != Tag::Plist
    }
}

/// Build a scalar value from the text of its element.
fn build_scalar(tag: Tag, text: &str, depth: usize) -> Result<Value> {
    let text = text.trim();
    match tag {
        Tag::String => Ok(Value::String(text.to_string())),
        Tag::Integer => text
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| ParseError::conversion("integer", text, e)),
        Tag::Real => text
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|e| ParseError::conversion("real", text, e)),
        Tag::Date => parse_date(text)
            .map(Value::Date)
            .map_err(|e| ParseError::conversion("date", text, e)),
        Tag::Data => Ok(Value::Data(Data::from_base64(text))),
        Tag::True => Ok(Value::Bool(true)),
        Tag::False => Ok(Value::Bool(false)),
        Tag::Plist | Tag::Dict | Tag::Array | Tag::Key => Err(ParseError::structural(
            tag.name(),
            depth,
            "Not a scalar value element",
        )),
    }
}

// ============================================================================
// Listener
// ============================================================================

/// Receives the finished tree.
pub trait ParseListener {
    /// Called once per document, when `</plist>` is processed.
    fn on_parse_complete(&mut self, root: &Value);
}

impl<F: FnMut(&Value)> ParseListener for F {
    fn on_parse_complete(&mut self, root: &Value) {
        self(root)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Document-level state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentState {
    /// No `<plist>` seen yet.
    Unopened,
    /// Inside `<plist>`.
    Open,
    /// `</plist>` processed.
    Closed,
}

/// Where a value goes once it is complete. Fixed when the value's start tag
/// is processed.
#[derive(Debug)]
enum Slot {
    Root,
    Key(String),
    Append,
}

#[derive(Debug)]
enum Container {
    Dict(Dict),
    Array(Array),
}

impl Container {
    fn tag(&self) -> Tag {
        match self {
            Container::Dict(_) => Tag::Dict,
            Container::Array(_) => Tag::Array,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Container::Dict(d) => Value::Dict(d),
            Container::Array(a) => Value::Array(a),
        }
    }
}

#[derive(Debug)]
struct Frame {
    container: Container,
    slot: Slot,
}

/// Builds a value tree from parse events.
pub struct TreeBuilder<'l> {
    state: DocumentState,
    /// Open containers, innermost last.
    stack: Vec<Frame>,
    /// Text of the last `<key>`, waiting for its value.
    pending_key: Option<String>,
    /// Character data since the last tag boundary.
    text: String,
    /// The `key` or scalar element currently open, if any.
    open_leaf: Option<Tag>,
    /// Names of the currently open elements, `plist` included.
    open: Vec<String>,
    root: Option<Value>,
    listener: Option<Box<dyn ParseListener + 'l>>,
}

impl Default for TreeBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'l> TreeBuilder<'l> {
    /// Create a builder with no listener.
    pub fn new() -> Self {
        TreeBuilder {
            state: DocumentState::Unopened,
            stack: Vec::new(),
            pending_key: None,
            text: String::new(),
            open_leaf: None,
            open: Vec::new(),
            root: None,
            listener: None,
        }
    }

    /// Register a listener for completed documents.
    pub fn with_listener(mut self, listener: impl ParseListener + 'l) -> Self {
        self.set_listener(listener);
        self
    }

    /// Register a listener for completed documents, replacing any other.
    pub fn set_listener(&mut self, listener: impl ParseListener + 'l) {
        self.listener = Some(Box::new(listener));
    }

    /// Current document state.
    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// The root value, once the outermost value element has closed.
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Take the root value, whatever the document state.
    pub fn into_root(self) -> Option<Value> {
        self.root
    }

    /// Take the root value of a completed document.
    pub fn finish(self) -> Result<Value> {
        match (self.state, self.root) {
            (DocumentState::Closed, Some(root)) => Ok(root),
            _ => Err(ParseError::structural(
                Tag::Plist.name(),
                self.open.len(),
                "Document ended before </plist>",
            )),
        }
    }

    /// Dispatch an owned event to the matching entry point.
    pub fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::DocumentStart => {
                self.document_start();
                Ok(())
            }
            Event::ElementStart { name, attributes } => self.element_start(name, attributes),
            Event::Characters(text) => {
                self.characters(text);
                Ok(())
            }
            Event::ElementEnd { name } => self.element_end(name),
            Event::DocumentEnd => self.document_end(),
        }
    }

    /// Reset all state for a new document. The listener is kept.
    pub fn document_start(&mut self) {
        trace!("document start");
        self.state = DocumentState::Unopened;
        self.stack.clear();
        self.pending_key = None;
        self.text.clear();
        self.open_leaf = None;
        self.open.clear();
        self.root = None;
    }

    /// Process a start tag.
    pub fn element_start(&mut self, name: &str, attributes: &[(String, String)]) -> Result<()> {
        trace!(name, depth = self.depth(), attributes = attributes.len(), "element start");
        self.text.clear();

        if let Some(leaf) = self.open_leaf {
            return Err(self.error(name, format!("<{}> cannot contain elements", leaf.name())));
        }

        let tag = Tag::from_name(name);
        match (self.state, tag) {
            (DocumentState::Unopened, Some(Tag::Plist)) => {
                self.state = DocumentState::Open;
                self.open.push(name.to_string());
                return Ok(());
            }
            (DocumentState::Unopened, _) => {
                return Err(self.error(name, "Invalid PList: expected a <plist> root element"));
            }
            (_, Some(Tag::Plist)) => {
                return Err(self.error(name, "Only one <plist> element is allowed"));
            }
            (DocumentState::Closed, _) => {
                return Err(self.error(name, "Unexpected element after </plist>"));
            }
            (DocumentState::Open, _) => {}
        }

        let Some(tag) = tag else {
            debug!(name, depth = self.depth(), "skipping unknown element");
            self.open.push(name.to_string());
            return Ok(());
        };

        match tag {
            Tag::Key => {
                if !matches!(self.top(), Some(Container::Dict(_))) {
                    return Err(self.error(name, "<key> must be inside a <dict>"));
                }
                self.open_leaf = Some(tag);
            }
            Tag::Dict | Tag::Array => {
                let slot = self.claim_slot(name)?;
                let container = if tag == Tag::Dict {
                    Container::Dict(Dict::new())
                } else {
                    Container::Array(Array::new())
                };
                self.stack.push(Frame { container, slot });
            }
            _ => {
                self.check_slot(name)?;
                self.open_leaf = Some(tag);
            }
        }
        self.open.push(name.to_string());
        Ok(())
    }

    /// Append a text run.
    pub fn characters(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Process an end tag.
    pub fn element_end(&mut self, name: &str) -> Result<()> {
        trace!(name, depth = self.depth(), "element end");
        let result = self.close_element(name);
        self.text.clear();
        result
    }

    /// Signal end of input.
    pub fn document_end(&mut self) -> Result<()> {
        trace!(state = ?self.state, "document end");
        match self.state {
            DocumentState::Closed => Ok(()),
            DocumentState::Unopened => Err(self.error(
                Tag::Plist.name(),
                "Document contains no <plist> element",
            )),
            DocumentState::Open => Err(self.error(
                Tag::Plist.name(),
                "Document ended before </plist>",
            )),
        }
    }

    fn close_element(&mut self, name: &str) -> Result<()> {
        if self.state != DocumentState::Open {
            return Err(self.error(name, format!("Unexpected </{}>", name)));
        }

        match self.open.last() {
            Some(open) if open.eq_ignore_ascii_case(name) => {}
            Some(open) => {
                return Err(self.error(name, format!("Expected </{}>, found </{}>", open, name)));
            }
            None => return Err(self.error(name, format!("Unexpected </{}>", name))),
        }

        let Some(tag) = Tag::from_name(name) else {
            debug!(name, depth = self.depth(), "leaving unknown element");
            self.open.pop();
            return Ok(());
        };

        match tag {
            Tag::Key => {
                let key = self.text.trim().to_string();
                trace!(key = key.as_str(), "pending key");
                self.pending_key = Some(key);
                self.open_leaf = None;
            }
            Tag::Dict | Tag::Array => {
                let Some(Frame { container, slot }) = self.stack.pop() else {
                    return Err(self.error(name, format!("Unmatched </{}>", name)));
                };
                if let Some(key) = self.pending_key.take() {
                    debug!(key = key.as_str(), "dropping <key> with no value");
                }
                self.attach(name, slot, container.into_value())?;
            }
            Tag::Plist => {
                let Some(root) = self.root.as_ref() else {
                    return Err(self.error(name, "PList has no root value"));
                };
                self.state = DocumentState::Closed;
                debug!(kind = %root.kind(), "plist complete");
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_parse_complete(root);
                }
            }
            _ => {
                let value = build_scalar(tag, &self.text, self.depth())?;
                let slot = self.claim_slot(name)?;
                self.attach(name, slot, value)?;
                self.open_leaf = None;
            }
        }
        self.open.pop();
        Ok(())
    }

    fn top(&self) -> Option<&Container> {
        self.stack.last().map(|frame| &frame.container)
    }

    /// Check that a value element may start here.
    fn check_slot(&self, name: &str) -> Result<()> {
        match self.top() {
            None if self.root.is_some() => {
                Err(self.error(name, "PList has more than one root value"))
            }
            Some(Container::Dict(_)) if self.pending_key.is_none() => {
                Err(self.error(name, "Values inside a <dict> need a preceding <key>"))
            }
            _ => Ok(()),
        }
    }

    /// Decide where the next value goes, consuming the pending key.
    fn claim_slot(&mut self, name: &str) -> Result<Slot> {
        self.check_slot(name)?;
        let parent = self.top().map(Container::tag);
        Ok(match parent {
            None => Slot::Root,
            Some(Tag::Dict) => Slot::Key(self.pending_key.take().unwrap_or_default()),
            Some(_) => Slot::Append,
        })
    }

    fn attach(&mut self, name: &str, slot: Slot, value: Value) -> Result<()> {
        trace!(name, slot = ?slot, "attach");
        let depth = self.depth();
        let top = self.stack.last_mut().map(|frame| &mut frame.container);
        match (slot, top) {
            (Slot::Root, None) => {
                self.root = Some(value);
                Ok(())
            }
            (Slot::Key(key), Some(Container::Dict(dict))) => {
                dict.put(key, value);
                Ok(())
            }
            (Slot::Append, Some(Container::Array(arr))) => {
                arr.push(value);
                Ok(())
            }
            _ => Err(ParseError::structural(name, depth, "Value has no valid parent")),
        }
    }

    fn error(&self, name: &str, reason: impl Into<String>) -> ParseError {
        ParseError::structural(name, self.depth(), reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn feed(builder: &mut TreeBuilder<'_>, events: &[Event]) -> Result<()> {
        for event in events {
            builder.handle_event(event)?;
        }
        Ok(())
    }

    fn leaf(name: &str, text: &str) -> Vec<Event> {
        vec![Event::start(name), Event::text(text), Event::end(name)]
    }

    fn document(body: Vec<Event>) -> Vec<Event> {
        let mut events = vec![Event::DocumentStart, Event::start("plist")];
        events.extend(body);
        events.push(Event::end("plist"));
        events.push(Event::DocumentEnd);
        events
    }

    #[test]
    fn tag_lookup_ignores_case() {
        assert_eq!(Tag::from_name("DICT"), Some(Tag::Dict));
        assert_eq!(Tag::from_name("Integer"), Some(Tag::Integer));
        assert_eq!(Tag::from_name("plists"), None);
        assert!(Tag::Key.is_leaf());
        assert!(!Tag::Plist.is_leaf());
    }

    #[test]
    fn bare_scalar_root() {
        let mut b = TreeBuilder::new();
        feed(&mut b, &document(leaf("integer", " 1 "))).unwrap();
        assert_eq!(b.state(), DocumentState::Closed);
        assert_eq!(b.finish(), Ok(Value::Integer(1)));
    }

    #[test]
    fn text_runs_concatenate() {
        let mut b = TreeBuilder::new();
        let body = vec![
            Event::start("string"),
            Event::text("hel"),
            Event::text("lo "),
            Event::text("world"),
            Event::end("string"),
        ];
        feed(&mut b, &document(body)).unwrap();
        assert_eq!(b.finish(), Ok(Value::from("hello world")));
    }

    #[test]
    fn booleans_ignore_text() {
        let mut b = TreeBuilder::new();
        let mut body = vec![Event::start("array")];
        body.extend(leaf("true", "nope"));
        body.extend(leaf("false", "yes"));
        body.push(Event::end("array"));
        feed(&mut b, &document(body)).unwrap();
        assert_eq!(
            b.finish(),
            Ok(Value::from(vec![Value::Bool(true), Value::Bool(false)]))
        );
    }

    #[test]
    fn dict_pairs_keys_with_values() {
        let mut b = TreeBuilder::new();
        let mut body = vec![Event::start("dict")];
        body.extend(leaf("key", " name "));
        body.extend(leaf("string", "value"));
        body.extend(leaf("key", "count"));
        body.extend(leaf("integer", "-3"));
        body.extend(leaf("key", "name"));
        body.extend(leaf("string", "again"));
        body.push(Event::end("dict"));
        feed(&mut b, &document(body)).unwrap();

        let root = b.finish().unwrap();
        let dict = root.as_dict().unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get_string("name"), Ok(Some("again")));
        assert_eq!(dict.get_integer("count"), Ok(Some(-3)));
    }

    #[test]
    fn array_of_dicts_keeps_order() {
        let mut b = TreeBuilder::new();
        let mut body = vec![Event::start("array")];
        for n in ["1", "2"] {
            body.push(Event::start("dict"));
            body.extend(leaf("key", "n"));
            body.extend(leaf("integer", n));
            body.push(Event::end("dict"));
        }
        body.push(Event::end("array"));
        feed(&mut b, &document(body)).unwrap();

        let root = b.finish().unwrap();
        let arr = root.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0].as_dict().unwrap().get_integer("n"), Ok(Some(1)));
        assert_eq!(arr[1].as_dict().unwrap().get_integer("n"), Ok(Some(2)));
    }

    #[test]
    fn listener_fires_once_with_root() {
        let seen = RefCell::new(Vec::new());
        let mut b = TreeBuilder::new().with_listener(|root: &Value| seen.borrow_mut().push(root.clone()));
        let mut body = vec![Event::start("array")];
        body.extend(leaf("real", "2.5"));
        body.push(Event::end("array"));
        feed(&mut b, &document(body)).unwrap();
        assert_eq!(b.depth(), 0);
        drop(b);
        assert_eq!(*seen.borrow(), vec![Value::from(vec![Value::Real(2.5)])]);
    }

    #[test]
    fn reset_allows_second_document() {
        let mut b = TreeBuilder::new();
        feed(&mut b, &document(leaf("string", "one"))).unwrap();
        assert_eq!(b.root(), Some(&Value::from("one")));
        feed(&mut b, &document(leaf("string", "two"))).unwrap();
        assert_eq!(b.root(), Some(&Value::from("two")));
    }

    #[test]
    fn value_before_plist_is_structural() {
        for name in ["integer", "array"] {
            let mut b = TreeBuilder::new();
            b.document_start();
            let err = b.element_start(name, &[]).unwrap_err();
            assert!(err.is_structural());
            assert_eq!(
                err,
                ParseError::structural(name, 0, "Invalid PList: expected a <plist> root element")
            );
        }
    }

    #[test]
    fn second_plist_is_structural() {
        let mut b = TreeBuilder::new();
        b.document_start();
        b.element_start("plist", &[]).unwrap();
        let err = b.element_start("plist", &[]).unwrap_err();
        assert_eq!(err, ParseError::structural("plist", 1, "Only one <plist> element is allowed"));
    }

    #[test]
    fn key_outside_dict_is_structural() {
        let mut b = TreeBuilder::new();
        let err = feed(&mut b, &document(vec![Event::start("array"), Event::start("key")]))
            .unwrap_err();
        assert_eq!(err, ParseError::structural("key", 2, "<key> must be inside a <dict>"));
    }

    #[test]
    fn dict_value_without_key_is_structural() {
        let mut b = TreeBuilder::new();
        let mut body = vec![Event::start("dict")];
        body.extend(leaf("string", "orphan"));
        let err = feed(&mut b, &document(body)).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn element_inside_scalar_is_structural() {
        let mut b = TreeBuilder::new();
        let body = vec![Event::start("string"), Event::start("dict")];
        let err = feed(&mut b, &document(body)).unwrap_err();
        assert_eq!(err, ParseError::structural("dict", 2, "<string> cannot contain elements"));
    }

    #[test]
    fn two_roots_are_structural() {
        let mut b = TreeBuilder::new();
        let mut body = leaf("integer", "1");
        body.extend(leaf("integer", "2"));
        let err = feed(&mut b, &document(body)).unwrap_err();
        assert_eq!(err, ParseError::structural("integer", 1, "PList has more than one root value"));
    }

    #[test]
    fn mismatched_close_is_structural() {
        let mut b = TreeBuilder::new();
        let body = vec![Event::start("dict"), Event::end("array")];
        let err = feed(&mut b, &document(body)).unwrap_err();
        assert_eq!(
            err,
            ParseError::structural("array", 2, "Expected </dict>, found </array>")
        );
    }

    #[test]
    fn unclosed_container_at_plist_end() {
        let mut b = TreeBuilder::new();
        let err = feed(&mut b, &document(vec![Event::start("array")])).unwrap_err();
        assert_eq!(
            err,
            ParseError::structural("plist", 2, "Expected </array>, found </plist>")
        );
    }

    #[test]
    fn unclosed_unknown_element_at_plist_end() {
        let fired = RefCell::new(0);
        let mut b = TreeBuilder::new().with_listener(|_: &Value| *fired.borrow_mut() += 1);
        let mut body = vec![Event::start("foo")];
        body.extend(leaf("integer", " 7 "));
        let err = feed(&mut b, &document(body)).unwrap_err();
        assert_eq!(
            err,
            ParseError::structural("plist", 2, "Expected </foo>, found </plist>")
        );
        assert_eq!(b.state(), DocumentState::Open);
        drop(b);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn stray_end_tag_inside_unknown_element() {
        let mut b = TreeBuilder::new();
        let body = vec![Event::start("array"), Event::start("note"), Event::end("array")];
        let err = feed(&mut b, &document(body)).unwrap_err();
        assert_eq!(
            err,
            ParseError::structural("array", 3, "Expected </note>, found </array>")
        );
    }

    #[test]
    fn start_tag_after_plist_is_structural() {
        let mut b = TreeBuilder::new();
        b.document_start();
        feed(&mut b, &[Event::start("plist")]).unwrap();
        feed(&mut b, &leaf("string", "done")).unwrap();
        feed(&mut b, &[Event::end("plist")]).unwrap();
        assert_eq!(b.state(), DocumentState::Closed);

        let err = b.element_start("dict", &[]).unwrap_err();
        assert_eq!(err, ParseError::structural("dict", 0, "Unexpected element after </plist>"));
        assert_eq!(b.root(), Some(&Value::from("done")));
    }

    #[test]
    fn end_tag_after_plist_is_structural() {
        let mut b = TreeBuilder::new();
        b.document_start();
        feed(&mut b, &[Event::start("plist")]).unwrap();
        feed(&mut b, &leaf("integer", "1")).unwrap();
        feed(&mut b, &[Event::end("plist")]).unwrap();

        let err = b.element_end("dict").unwrap_err();
        assert_eq!(err, ParseError::structural("dict", 0, "Unexpected </dict>"));
        let err = b.element_end("plist").unwrap_err();
        assert_eq!(err, ParseError::structural("plist", 0, "Unexpected </plist>"));
        assert_eq!(b.finish(), Ok(Value::Integer(1)));
    }

    #[test]
    fn empty_plist_has_no_root() {
        let mut b = TreeBuilder::new();
        let err = feed(&mut b, &document(vec![])).unwrap_err();
        assert_eq!(err, ParseError::structural("plist", 1, "PList has no root value"));
    }

    #[test]
    fn conversion_errors_propagate() {
        let mut b = TreeBuilder::new();
        let err = feed(&mut b, &document(leaf("integer", "12abc"))).unwrap_err();
        assert!(err.is_conversion());

        let mut b = TreeBuilder::new();
        let err = feed(&mut b, &document(leaf("real", "one"))).unwrap_err();
        assert!(err.is_conversion());
    }

    #[test]
    fn unknown_elements_are_transparent() {
        let mut b = TreeBuilder::new();
        let mut body = vec![Event::start("array"), Event::start("comment")];
        body.push(Event::text("ignored"));
        body.push(Event::end("comment"));
        body.extend(leaf("string", "kept"));
        body.push(Event::end("array"));
        feed(&mut b, &document(body)).unwrap();
        assert_eq!(b.finish(), Ok(Value::from(vec![Value::from("kept")])));
    }

    #[test]
    fn document_end_requires_closed_plist() {
        let mut b = TreeBuilder::new();
        b.document_start();
        assert!(b.document_end().unwrap_err().is_structural());
        b.element_start("plist", &[]).unwrap();
        assert!(b.document_end().is_err());
        assert!(b.finish().is_err());
    }

    #[test]
    fn empty_date_is_unset() {
        let mut b = TreeBuilder::new();
        let body = vec![Event::start("date"), Event::end("date")];
        feed(&mut b, &document(body)).unwrap();
        assert_eq!(b.finish(), Ok(Value::Date(None)));
    }
}
