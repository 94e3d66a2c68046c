//! Error types for the element model.

use thiserror::Error;

/// Contract violations raised by the property-reflection protocol.
///
/// Both variants signal caller programming errors. There is no transient
/// condition behind them and no recovery beyond fixing the call site; they
/// are surfaced immediately and never coerced away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The id names no declared property on the variant or its base.
    #[error("unknown property '{property}' on {type_name}")]
    UnknownProperty {
        /// Canonical type name of the variant that rejected the access.
        type_name: &'static str,
        /// The property name (or rendered hash) that failed to resolve.
        property: String,
    },

    /// An assignment whose value variant is incompatible with the declared
    /// property kind.
    #[error("cannot store {actual} where {expected} is expected")]
    TypeMismatch {
        /// Canonical type name the property declares.
        expected: &'static str,
        /// Canonical type name of the rejected value.
        actual: &'static str,
    },
}

/// Modifier extensions were present where the caller declared it cannot
/// interpret them.
///
/// Returned only by `Element::check_no_modifiers`. A modifier extension
/// changes the meaning of its containing element, so proceeding without
/// understanding it would risk misreading clinical content; callers must
/// treat this as fatal to the current operation, not as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {verb} {noun}: unrecognized modifier extensions are present")]
pub struct UnrecognizedModifier {
    /// What was being processed, e.g. a type or field name.
    pub noun: String,
    /// What the caller was doing, e.g. "serialize".
    pub verb: String,
}
