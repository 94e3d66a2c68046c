//! Direct streaming JSON writer.
//!
//! A small hand-rolled writer instead of a general-purpose serializer,
//! because general-purpose serializers re-derive numeric text from parsed
//! values and silently change decimal precision (`1.50` becomes `1.5`).
//! Numeric literals handed to [`JsonWriter::value_num`] pass through
//! verbatim.
//!
//! The writer is a state machine over structural events (begin/end object
//! or array, name, value). Its memory is two flags: a name was just
//! written and owes its colon, or a value/structure just closed and owes a
//! comma before the next sibling. At most one flag is set at any point;
//! each event first resolves whichever flag is owed, then sets at most one
//! new flag. That single-flag rule is what lets the writer emit without
//! look-ahead — it never needs to know what comes next, only what came
//! immediately before.

use std::io::Write;

use rust_decimal::Decimal;

use crate::error::{Result, SerdeError};

/// One open container, tracked for structural checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// A streaming JSON writer over any [`Write`] sink.
///
/// Output is compact by default; [`JsonWriter::new_pretty`] produces the
/// two-space-indented, CRLF-terminated layout. Arrays are written inline
/// in both modes; only objects advance the indent level.
///
/// Structural misuse (closing the wrong container, closing more than was
/// opened, a member name outside an object, events after [`finish`]) is
/// detected and reported; after any error the document on the sink is in
/// an undefined state and must be discarded.
///
/// # Examples
///
/// ```ignore
/// use meridian_serde::JsonWriter;
///
/// let mut writer = JsonWriter::new(Vec::new());
/// writer.begin_object()?;
/// writer.name("dose")?;
/// writer.value_num("1.50")?; // emitted verbatim, never reformatted
/// writer.end_object()?;
/// writer.finish()?;
/// assert_eq!(writer.into_inner(), b"{\"dose\":1.50}");
/// ```
///
/// [`finish`]: JsonWriter::finish
pub struct JsonWriter<W: Write> {
    writer: W,
    pretty: bool,
    /// Open containers, innermost last.
    open: Vec<Container>,
    /// Number of open objects; arrays do not advance the indent.
    indent: usize,
    named: bool,
    valued: bool,
    finished: bool,
}

impl<W: Write> JsonWriter<W> {
    /// Creates a compact writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
            open: Vec::new(),
            indent: 0,
            named: false,
            valued: false,
            finished: false,
        }
    }

    /// Creates a pretty-printing writer: two-space indent units, CRLF line
    /// terminators, `" : "` as the name/value separator.
    pub fn new_pretty(writer: W) -> Self {
        Self {
            pretty: true,
            ..Self::new(writer)
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Opens an object.
    pub fn begin_object(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.resolve_pending()?;
        self.writer.write_all(b"{")?;
        self.open.push(Container::Object);
        if self.pretty {
            self.indent += 1;
            self.newline()?;
        }
        Ok(())
    }

    /// Closes the innermost object.
    ///
    /// No separator is owed across a closing brace, so any pending-value
    /// flag is discarded; the brace itself then owes the comma before the
    /// next sibling.
    pub fn end_object(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.named {
            return Err(unbalanced("object closed while a member name awaits its value"));
        }
        match self.open.pop() {
            Some(Container::Object) => {}
            Some(Container::Array) => {
                return Err(unbalanced("end of object while an array is open"));
            }
            None => return Err(unbalanced("end of object with nothing open")),
        }
        if self.pretty {
            self.indent -= 1;
            self.newline()?;
        }
        self.writer.write_all(b"}")?;
        self.valued = true;
        Ok(())
    }

    /// Opens an array. Arrays are laid out inline: no newline or indent
    /// step, in either mode.
    pub fn begin_array(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.resolve_pending()?;
        self.writer.write_all(b"[")?;
        self.open.push(Container::Array);
        Ok(())
    }

    /// Closes the innermost array.
    pub fn end_array(&mut self) -> Result<()> {
        self.ensure_open()?;
        match self.open.pop() {
            Some(Container::Array) => {}
            Some(Container::Object) => {
                return Err(unbalanced("end of array while an object is open"));
            }
            None => return Err(unbalanced("end of array with nothing open")),
        }
        self.writer.write_all(b"]")?;
        self.valued = true;
        Ok(())
    }

    /// Writes a member name; only valid directly inside an object.
    pub fn name(&mut self, name: &str) -> Result<()> {
        self.ensure_open()?;
        if self.open.last() != Some(&Container::Object) {
            return Err(unbalanced("member name outside of an object"));
        }
        self.resolve_pending()?;
        self.write_escaped(name)?;
        self.named = true;
        Ok(())
    }

    /// Writes a string value, escaped per JSON rules.
    pub fn value_str(&mut self, value: &str) -> Result<()> {
        self.ensure_open()?;
        self.resolve_pending()?;
        self.write_escaped(value)?;
        self.valued = true;
        Ok(())
    }

    /// Writes a boolean value.
    pub fn value_bool(&mut self, value: bool) -> Result<()> {
        self.ensure_open()?;
        self.resolve_pending()?;
        self.writer
            .write_all(if value { b"true" } else { b"false" })?;
        self.valued = true;
        Ok(())
    }

    /// Writes an integer value.
    pub fn value_int(&mut self, value: i64) -> Result<()> {
        self.ensure_open()?;
        self.resolve_pending()?;
        write!(self.writer, "{value}")?;
        self.valued = true;
        Ok(())
    }

    /// Writes a decimal value using its scale-preserving display form.
    pub fn value_decimal(&mut self, value: &Decimal) -> Result<()> {
        self.ensure_open()?;
        self.resolve_pending()?;
        write!(self.writer, "{value}")?;
        self.valued = true;
        Ok(())
    }

    /// Writes a numeric literal exactly as given.
    ///
    /// The text is never re-parsed or re-formatted — this is the operation
    /// that keeps decimal precision intact through serialization. The
    /// caller is responsible for `text` being a valid JSON number.
    pub fn value_num(&mut self, text: &str) -> Result<()> {
        self.ensure_open()?;
        self.resolve_pending()?;
        self.writer.write_all(text.as_bytes())?;
        self.valued = true;
        Ok(())
    }

    /// Writes a `null`.
    pub fn null_value(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.resolve_pending()?;
        self.writer.write_all(b"null")?;
        self.valued = true;
        Ok(())
    }

    /// Marks the document complete and flushes the sink.
    ///
    /// Fails with [`SerdeError::UnbalancedStructure`] if containers remain
    /// open; every operation after a successful `finish` fails with
    /// [`SerdeError::WriterClosed`].
    pub fn finish(&mut self) -> Result<()> {
        self.ensure_open()?;
        if !self.open.is_empty() {
            return Err(unbalanced("finish with open structures"));
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finished {
            Err(SerdeError::WriterClosed)
        } else {
            Ok(())
        }
    }

    /// Emits whichever separator is owed and clears its flag.
    fn resolve_pending(&mut self) -> Result<()> {
        if self.named {
            self.writer
                .write_all(if self.pretty { b" : " } else { b":" })?;
            self.named = false;
        }
        if self.valued {
            self.writer.write_all(b",")?;
            if self.pretty {
                self.newline()?;
            }
            self.valued = false;
        }
        Ok(())
    }

    fn newline(&mut self) -> Result<()> {
        self.writer.write_all(b"\r\n")?;
        for _ in 0..self.indent {
            self.writer.write_all(b"  ")?;
        }
        Ok(())
    }

    fn write_escaped(&mut self, text: &str) -> Result<()> {
        serde_json::to_writer(&mut self.writer, text)?;
        Ok(())
    }
}

fn unbalanced(context: &str) -> SerdeError {
    SerdeError::UnbalancedStructure(context.to_string())
}
