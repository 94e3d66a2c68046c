//! Precision-preserving decimal values.
//!
//! General-purpose JSON libraries re-derive numeric text from a parsed
//! value, which silently turns `1.50` into `1.5` (or worse). Clinical
//! quantities carry significance in their written precision, so the decimal
//! primitive keeps the exact source text it was created from and hands that
//! text back, untouched, at serialization time.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// A decimal number that remembers exactly how it was written.
///
/// Pairs a parsed [`Decimal`] (for numeric operations and validity checks)
/// with the verbatim source text (for loss-free output). Equality follows
/// BigDecimal semantics: `1.5` and `1.50` are different values because they
/// differ in scale.
#[derive(Debug, Clone)]
pub struct PreciseDecimal {
    value: Decimal,
    original: String,
}

impl PreciseDecimal {
    /// Parses `text` as a decimal literal, keeping the text verbatim.
    ///
    /// Plain and scientific notation are both accepted.
    pub fn parse(text: &str) -> Result<Self, rust_decimal::Error> {
        let value = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text))?;
        Ok(Self {
            value,
            original: text.to_string(),
        })
    }

    /// The parsed numeric value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// The verbatim text this decimal was created from.
    pub fn original_text(&self) -> &str {
        &self.original
    }
}

impl From<Decimal> for PreciseDecimal {
    fn from(value: Decimal) -> Self {
        Self {
            original: value.to_string(),
            value,
        }
    }
}

impl FromStr for PreciseDecimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PreciseDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for PreciseDecimal {
    fn eq(&self, other: &Self) -> bool {
        // Scale participates: 1.5 != 1.50, as in BigDecimal.equals.
        self.value == other.value && self.value.scale() == other.value.scale()
    }
}

impl Eq for PreciseDecimal {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_keeps_the_source_text() {
        let d = PreciseDecimal::parse("1.50").unwrap();
        assert_eq!(d.original_text(), "1.50");
        assert_eq!(d.to_string(), "1.50");
        assert_eq!(d.value(), dec!(1.50));
    }

    #[test]
    fn scientific_notation_is_accepted_verbatim() {
        let d = PreciseDecimal::parse("1.5e2").unwrap();
        assert_eq!(d.original_text(), "1.5e2");
        assert_eq!(d.value(), dec!(150));
    }

    #[test]
    fn equality_includes_scale() {
        let short = PreciseDecimal::parse("1.5").unwrap();
        let long = PreciseDecimal::parse("1.50").unwrap();
        assert_ne!(short, long);
        assert_eq!(long, PreciseDecimal::parse("1.50").unwrap());
    }

    #[test]
    fn from_decimal_renders_with_its_scale() {
        let d = PreciseDecimal::from(dec!(123.450));
        assert_eq!(d.original_text(), "123.450");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(PreciseDecimal::parse("not-a-number").is_err());
    }
}
