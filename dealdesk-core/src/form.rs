//! Form editor state for creating and updating records.
//!
//! A form is a transient copy of a record: edits never touch the cached
//! list copy. Validation runs only on submit; field errors persist until
//! the next submit rather than clearing on keystrokes.

use std::collections::BTreeMap;

use dealdesk_api::schema::{self, FieldIssue};
use dealdesk_api::{EntityDescriptor, FieldSpec, Record, RecordFields};

/// Bound input state for one record, new or existing.
#[derive(Debug, Clone)]
pub struct FormState {
    descriptor: EntityDescriptor,
    record_id: Option<String>,
    /// Values parallel to the descriptor's field list.
    values: Vec<String>,
    /// Field key -> message, populated by the last `validate` call.
    errors: BTreeMap<String, String>,
    /// Index of the focused field.
    pub focus: usize,
}

impl FormState {
    /// Empty form for a new, unsaved record.
    #[must_use]
    pub fn new(descriptor: EntityDescriptor) -> Self {
        let values = vec![String::new(); descriptor.fields.len()];
        Self {
            descriptor,
            record_id: None,
            values,
            errors: BTreeMap::new(),
            focus: 0,
        }
    }

    /// Form pre-filled from an existing record (update on submit).
    #[must_use]
    pub fn editing(descriptor: EntityDescriptor, record: &Record) -> Self {
        let values = descriptor
            .fields
            .iter()
            .map(|spec| record.field(spec.key).unwrap_or_default().to_string())
            .collect();
        Self {
            descriptor,
            record_id: Some(record.id.clone()),
            values,
            errors: BTreeMap::new(),
            focus: 0,
        }
    }

    /// Identifier of the record being edited; `None` for a new record.
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// Whether submitting will create rather than update.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.record_id.is_none()
    }

    /// Declared fields, in form order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.descriptor.fields
    }

    /// Current value of the field at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> &str {
        self.values.get(index).map_or("", String::as_str)
    }

    /// Mutable access to the focused field's value, for text input.
    pub fn focused_value_mut(&mut self) -> &mut String {
        let index = self.focus.min(self.values.len().saturating_sub(1));
        &mut self.values[index]
    }

    /// Move focus to the next field, wrapping.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.descriptor.fields.len().max(1);
    }

    /// Move focus to the previous field, wrapping.
    pub fn focus_prev(&mut self) {
        let count = self.descriptor.fields.len().max(1);
        self.focus = (self.focus + count - 1) % count;
    }

    /// Validation message for a field key, if the last submit flagged it.
    #[must_use]
    pub fn error_for(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Whether the last submit produced validation errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Collect current values keyed by field name.
    #[must_use]
    pub fn to_fields(&self) -> RecordFields {
        self.descriptor
            .fields
            .iter()
            .zip(&self.values)
            .map(|(spec, value)| (spec.key.to_string(), value.clone()))
            .collect()
    }

    /// Run schema validation over the current values.
    ///
    /// Replaces the stored errors with one message per invalid field and
    /// returns whether the form may be submitted.
    pub fn validate(&mut self) -> bool {
        let issues = schema::validate(&self.descriptor, &self.to_fields());
        self.errors = issues
            .into_iter()
            .map(|FieldIssue { field, message }| (field, message))
            .collect();
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealdesk_api::EntityKind;

    #[test]
    fn new_form_has_empty_values_and_no_id() {
        let form = FormState::new(EntityKind::Deal.descriptor());
        assert!(form.is_new());
        assert_eq!(form.fields().len(), 4);
        assert_eq!(form.value(0), "");
    }

    #[test]
    fn editing_form_copies_record_values() {
        let record = Record::new(
            "d1",
            [
                ("name", "Acme"),
                ("type", "Merger"),
                ("status", "Open"),
                ("value", "$10M"),
            ],
        );
        let form = FormState::editing(EntityKind::Deal.descriptor(), &record);
        assert_eq!(form.record_id(), Some("d1"));
        assert_eq!(form.value(0), "Acme");
        assert_eq!(form.value(3), "$10M");
    }

    #[test]
    fn editing_does_not_alias_the_record() {
        let record = Record::new("d1", [("name", "Acme")]);
        let mut form = FormState::editing(EntityKind::Deal.descriptor(), &record);
        form.focused_value_mut().push_str(" Holdings");
        assert_eq!(record.field("name"), Some("Acme"));
    }

    #[test]
    fn validate_flags_each_empty_field_once() {
        let mut form = FormState::new(EntityKind::Deal.descriptor());
        form.focused_value_mut().push_str("Acme");
        assert!(!form.validate());
        assert_eq!(form.error_for("name"), None);
        assert_eq!(form.error_for("type"), Some("Type is required"));
        assert_eq!(form.error_for("status"), Some("Status is required"));
        assert_eq!(form.error_for("value"), Some("Value is required"));
    }

    #[test]
    fn errors_persist_across_edits_until_next_validate() {
        let mut form = FormState::new(EntityKind::Deal.descriptor());
        assert!(!form.validate());
        assert!(form.has_errors());

        // Typing does not clear errors; only the next validate does.
        form.focused_value_mut().push_str("Acme");
        assert!(form.has_errors());
    }

    #[test]
    fn focus_wraps_both_directions() {
        let mut form = FormState::new(EntityKind::Prospect.descriptor());
        form.focus_prev();
        assert_eq!(form.focus, 3);
        form.focus_next();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn to_fields_uses_declared_keys() {
        let mut form = FormState::new(EntityKind::Deal.descriptor());
        form.focused_value_mut().push_str("Acme");
        let fields = form.to_fields();
        assert_eq!(fields.get("name").map(String::as_str), Some("Acme"));
        assert_eq!(fields.len(), 4);
    }
}
