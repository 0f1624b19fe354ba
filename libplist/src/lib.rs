//! PList XML parser.
//!
//! Turns an Apple property list XML document into a typed [`Value`] tree and
//! offers dotted-path lookups into the dictionaries of that tree.
//!
//! # Parsing Pipeline
//!
//! 1. **Reader**: `quick-xml` pulls elements and text from the source and
//!    pushes them to the builder as start, characters and end events.
//!
//! 2. **Tree Builder**: a stack machine over open `<dict>` and `<array>`
//!    elements. It enforces the PList nesting rules, converts leaf text to
//!    typed scalars, and links each value into its parent.
//!
//! 3. **Lookup**: [`Dict::get`] and its typed relatives resolve paths such as
//!    `CFBundleDocumentTypes.Editor.Name` in the finished tree.
//!
//! The builder does not depend on the reader; any event source can drive it
//! (see [`Event`] and [`TreeBuilder`]).

mod builder;
mod date;
mod dict;
mod error;
mod event;
mod reader;
mod value;

pub use builder::{DocumentState, ParseListener, Tag, TreeBuilder};
pub use date::parse_date;
pub use dict::{Dict, PATH_SEPARATOR};
pub use error::{LookupError, ParseContext, ParseError, Result};
pub use event::{build_from_events, build_from_events_indexed, events_for, Event};
pub use value::{Array, Data, Value, ValueKind};

/// Parse a PList XML document from a string.
///
/// # Example
///
/// ```
/// use libplist::parse;
///
/// let root = parse("<plist><dict><key>n</key><integer>42</integer></dict></plist>").unwrap();
/// assert_eq!(root.as_dict().unwrap().get_integer("n"), Ok(Some(42)));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_filename(input, None)
}

/// Parse a PList XML document from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Value> {
    let mut builder = TreeBuilder::new();
    parse_into(input, filename, &mut builder)?;
    builder.finish()
}

/// Drive an existing builder over `input`, so that its listener sees the
/// finished tree.
pub fn parse_into(input: &str, filename: Option<&str>, builder: &mut TreeBuilder<'_>) -> Result<()> {
    let ctx = ParseContext::new(filename);
    reader::read_into(input, &ctx, builder)
}
