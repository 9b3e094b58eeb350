//! # Error Types
//!
//! Structured error types for beam_core. Every error carries enough context
//! (field, section index, quantity) for a caller to fix the input without
//! re-running anything, and serializes cleanly to JSON.
//!
//! Errors fall into three categories:
//!
//! - **Configuration**: the beam, a section, or a material record is invalid.
//!   Reported before any mechanics are evaluated.
//! - **Computation**: a derived quantity came out non-finite (or a stiffness
//!   came out non-positive). Reported with the failing section and quantity.
//! - **Io**: reading or writing definition files and material tables.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{CalcError, CalcResult, ErrorCategory};
//!
//! fn validate_length(length: f64) -> CalcResult<()> {
//!     if length <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length",
//!             length.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_length(-1.0).unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::Configuration);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Broad classification of a [`CalcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Invalid input; analysis never started
    Configuration,
    /// A derived quantity could not be represented
    Computation,
    /// File or parse failure outside the engine
    Io,
}

/// Structured error type for beam analysis and its collaborators.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A section input is invalid; `section` is its index in the beam
    #[error("Invalid section {section}: '{field}' = {value} - {reason}")]
    InvalidSection {
        section: usize,
        field: String,
        value: String,
        reason: String,
    },

    /// A required setting has neither a section override nor a beam default
    #[error("Missing required field: {field}{}", section_suffix(.section))]
    MissingField {
        field: String,
        section: Option<usize>,
    },

    /// Material not found in the material table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A material record failed validation when the table was loaded
    #[error("Invalid material '{material_name}': {reason}")]
    InvalidMaterial {
        material_name: String,
        reason: String,
    },

    /// Analysis was requested on a beam without sections
    #[error("Beam has no sections to analyze")]
    EmptyBeam,

    /// A derived quantity is not finite (or a stiffness is not positive)
    #[error("Computation failed at section {section}: {quantity} = {value}")]
    NonFiniteResult {
        section: usize,
        quantity: String,
        value: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON or TOML serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

fn section_suffix(section: &Option<usize>) -> String {
    match section {
        Some(index) => format!(" (section {})", index),
        None => String::new(),
    }
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>, section: Option<usize>) -> Self {
        CalcError::MissingField {
            field: field.into(),
            section,
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an InvalidMaterial error
    pub fn invalid_material(material_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidMaterial {
            material_name: material_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a NonFiniteResult error
    pub fn non_finite(section: usize, quantity: impl Into<String>, value: f64) -> Self {
        CalcError::NonFiniteResult {
            section,
            quantity: quantity.into(),
            value: value.to_string(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Attach a section index to an error raised while building that section.
    ///
    /// `InvalidInput` becomes `InvalidSection`, `MissingField` gains the index.
    /// Other variants pass through unchanged.
    pub fn in_section(self, section: usize) -> Self {
        match self {
            CalcError::InvalidInput {
                field,
                value,
                reason,
            } => CalcError::InvalidSection {
                section,
                field,
                value,
                reason,
            },
            CalcError::MissingField { field, .. } => CalcError::MissingField {
                field,
                section: Some(section),
            },
            other => other,
        }
    }

    /// Which broad category this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::InvalidInput { .. }
            | CalcError::InvalidSection { .. }
            | CalcError::MissingField { .. }
            | CalcError::MaterialNotFound { .. }
            | CalcError::InvalidMaterial { .. }
            | CalcError::EmptyBeam => ErrorCategory::Configuration,
            CalcError::NonFiniteResult { .. } => ErrorCategory::Computation,
            CalcError::FileError { .. }
            | CalcError::SerializationError { .. }
            | CalcError::VersionMismatch { .. } => ErrorCategory::Io,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidSection { .. } => "INVALID_SECTION",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::InvalidMaterial { .. } => "INVALID_MATERIAL",
            CalcError::EmptyBeam => "EMPTY_BEAM",
            CalcError::NonFiniteResult { .. } => "NON_FINITE_RESULT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Reject a value that is not finite and strictly positive.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a finite positive number",
        ));
    }
    Ok(value)
}

/// Reject a derived quantity that is not finite.
pub(crate) fn require_finite(section: usize, quantity: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::non_finite(section, quantity, value))
    }
}
