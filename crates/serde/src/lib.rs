//! # Meridian Serialization Module
//!
//! Streaming JSON serialization for the Meridian clinical data interchange
//! model.
//!
//! ## Why not a general-purpose serializer?
//!
//! General-purpose JSON libraries parse numbers into binary form and
//! re-derive their text on output, which silently changes decimal
//! precision: `1.50` comes back as `1.5`. Clinical quantities carry
//! significance in their written precision, so the write path here is a
//! direct structural-event writer ([`JsonWriter`]) that emits numeric
//! literals verbatim. `serde_json` is still used where it is safe — string
//! escaping — and as the parsing oracle in tests.
//!
//! ## Architecture
//!
//! - **Writer layer** ([`json::writer`]): a comma/colon/indentation state
//!   machine over structural events, streaming straight to any
//!   `io::Write` sink without materializing the document.
//! - **Serializer layer** ([`json::ser`]): walks any
//!   `meridian_model::Element` through the structural-reflection protocol
//!   and drives the writer. The model and the writer never call each
//!   other directly.
//!
//! ## Examples
//!
//! ```ignore
//! use meridian_model::Quantity;
//! use meridian_serde::{to_json_string, to_json_string_pretty};
//!
//! let dose = Quantity::parse("1.50", "mg")?;
//! let compact = to_json_string(&dose)?;   // {"value":1.50,"unit":"mg"}
//! let pretty = to_json_string_pretty(&dose)?;
//! ```

pub mod error;
pub mod json;

pub use error::{Result, SerdeError};
pub use json::{
    JsonWriter, to_json_string, to_json_string_pretty, to_json_vec, to_json_writer,
    to_json_writer_pretty,
};
