//! JSON support: the direct streaming writer and the element serializer.
//!
//! ## Output format
//!
//! A JSON-compatible text document. The member separator is `:` (`" : "`
//! when pretty-printing); the sibling separator is `,`; strings are
//! double-quoted with standard escaping of `"`, `\` and control
//! characters; booleans are `true`/`false`; `null` is the literal token.
//! Numeric values are emitted as the exact literal text supplied by the
//! caller — never re-parsed, never re-formatted — which is why this path
//! exists instead of a general-purpose serializer.
//!
//! ## Layers
//!
//! - [`writer`]: the [`JsonWriter`] structural-event state machine. It
//!   knows nothing about the element model; callers feed it begin/end,
//!   name and value events.
//! - [`ser`]: the reflection-driven serializer. It walks any
//!   `meridian_model::Element` through the property protocol and feeds
//!   the writer.

pub mod ser;
pub mod utils;
pub mod writer;

pub use ser::{
    to_json_string, to_json_string_pretty, to_json_vec, to_json_writer, to_json_writer_pretty,
};
pub use writer::JsonWriter;
