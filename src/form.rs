//! Generic form state with rule-driven field validation
//!
//! Holds a named map of field values plus the per-field validation rules
//! registered at construction. Validation is lazy: a rule only runs when its
//! field is blurred, and always against the value carried by the triggering
//! event, never against a stored value. Unset optional fields are *not*
//! materialized here; consumers apply their own empty defaults at the point
//! of use.

use std::collections::BTreeMap;
use std::fmt;

/// A single form field value.
///
/// Field identity is a name unique within the form instance; the variant is
/// whatever the owning screen stores under that name (free text, a numeric
/// choice, image URLs, selected entity ids).
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Free-form text input
    Text(String),
    /// A single numeric choice (e.g. from a single-select control)
    Number(i64),
    /// A list of text items (e.g. image URLs)
    TextList(Vec<String>),
    /// A list of entity ids (e.g. a multi-select's choices)
    IdList(Vec<u64>),
}

impl FieldValue {
    /// Text content, if this is a text field
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number field
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Item slice, if this is a text-list field
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(items) => Some(items),
            _ => None,
        }
    }

    /// Id slice, if this is an id-list field
    pub fn as_id_list(&self) -> Option<&[u64]> {
        match self {
            Self::IdList(ids) => Some(ids),
            _ => None,
        }
    }
}

/// A change or blur event reduced to its two relevant parts.
///
/// The core never sees the originating UI event type, only the field name
/// and the raw text the control carried at dispatch time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInput {
    /// Field name the event targets
    pub name: String,
    /// Raw text value carried by the event
    pub value: String,
}

impl FieldInput {
    /// Build an input event value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A per-field validation rule: `None` means valid, `Some` carries the
/// error message. Rules are total functions over the raw text; a rule that
/// panics is a programming error and the panic propagates.
pub type ValidationRule = Box<dyn Fn(&str) -> Option<String>>;

/// Form state container: field values, blur-derived errors, and the rule
/// registry, all keyed by field name.
pub struct FormState {
    initial: BTreeMap<String, FieldValue>,
    values: BTreeMap<String, FieldValue>,
    errors: BTreeMap<String, Option<String>>,
    rules: BTreeMap<String, ValidationRule>,
}

impl FormState {
    /// Create a form seeded with an initial value map. The snapshot is kept
    /// by value: later mutation of the caller's map does not affect resets.
    pub fn new(initial: BTreeMap<String, FieldValue>) -> Self {
        Self {
            values: initial.clone(),
            initial,
            errors: BTreeMap::new(),
            rules: BTreeMap::new(),
        }
    }

    /// Register a validation rule for a field. Intended for the construction
    /// phase, before events start flowing. A field with no rule is always
    /// valid.
    pub fn add_rule(
        &mut self,
        field: impl Into<String>,
        rule: impl Fn(&str) -> Option<String> + 'static,
    ) {
        self.rules.insert(field.into(), Box::new(rule));
    }

    /// Unconditional upsert of a field value. No validation side effect;
    /// used both for change events and for programmatic updates such as
    /// folding selection ids back into the form.
    pub fn set_field(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Apply a text change event
    pub fn handle_input_change(&mut self, input: FieldInput) {
        self.values.insert(input.name, FieldValue::Text(input.value));
    }

    /// Apply a single-select change event carrying a numeric choice
    pub fn handle_selector_change(&mut self, name: impl Into<String>, value: i64) {
        self.values.insert(name.into(), FieldValue::Number(value));
    }

    /// Run the field's rule against the raw value from a blur event.
    ///
    /// Without a registered rule this is a no-op: no error entry is written
    /// or changed. With one, the result overwrites any prior entry for the
    /// field, so a field's error always reflects its latest blur.
    pub fn validate_on_blur(&mut self, name: &str, raw_value: &str) {
        if let Some(rule) = self.rules.get(name) {
            let error = rule(raw_value);
            tracing::debug!("validated '{}' on blur: valid={}", name, error.is_none());
            self.errors.insert(name.to_string(), error);
        }
    }

    /// Apply a blur event
    pub fn handle_blur(&mut self, input: &FieldInput) {
        self.validate_on_blur(&input.name, &input.value);
    }

    /// Restore the construction snapshot and clear all errors
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
    }

    /// Current value of a field, if it has been set
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// The full value map
    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    /// Current error message for a field. `None` either means the field has
    /// never been blurred or that its latest blur validated clean; use
    /// [`FormState::errors`] to distinguish the two.
    pub fn error_message(&self, name: &str) -> Option<&str> {
        self.errors.get(name).and_then(|e| e.as_deref())
    }

    /// The full error map. A key is present iff the field has a rule and
    /// has been blurred at least once; `None` values mean the latest blur
    /// was valid.
    pub fn errors(&self) -> &BTreeMap<String, Option<String>> {
        &self.errors
    }

    /// Whether any field currently carries an error message
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|e| e.is_some())
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("ruled_fields", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
