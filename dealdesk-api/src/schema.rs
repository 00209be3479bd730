//! Client-side schema validation.
//!
//! Every field an [`EntityDescriptor`] declares is required and must be
//! non-empty (whitespace-only counts as empty). Validation is a pure
//! function over raw field values: it never touches the network, and a
//! submission with any issue must not either.

use serde::Serialize;

use crate::record::RecordFields;
use crate::types::EntityDescriptor;

/// A single field-level validation failure, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Machine-readable field key (e.g. `"name"`).
    pub field: String,
    /// Human-readable message (e.g. `"Name is required"`).
    pub message: String,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate raw field values against an entity's declared field list.
///
/// Returns exactly one issue per missing or empty declared field, in
/// declaration order. An empty result means the values may be submitted.
/// Fields not declared by the descriptor are ignored.
#[must_use]
pub fn validate(descriptor: &EntityDescriptor, values: &RecordFields) -> Vec<FieldIssue> {
    descriptor
        .fields
        .iter()
        .filter(|spec| {
            values
                .get(spec.key)
                .is_none_or(|v| v.trim().is_empty())
        })
        .map(|spec| FieldIssue {
            field: spec.key.to_string(),
            message: format!("{} is required", spec.label),
        })
        .collect()
}
