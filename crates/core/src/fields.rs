//! Field binding layer: field definitions, raw form values, normalization
//! between stored and editable representations, and field-level errors.
//!
//! Every editable attribute goes through the same two conversions:
//!
//! - **pre-fill**: a stored `Option<String>` becomes an editable `String`
//!   (`None` -> `""`) via [`to_editable`].
//! - **write-back**: an edited `String` is trimmed, and an empty result
//!   becomes `None` via [`from_editable`]. Free text that keeps its layout
//!   goes through [`from_editable_text`] instead, which only nulls blanks.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::store::RecordUpdate;
use crate::types::UserId;

/// Inline message shown when a required field is left blank.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill out the required fields";

/// Error code for a blank required field.
pub const CODE_REQUIRED: &str = "required";

/// Error code for a value that could not be parsed.
pub const CODE_INVALID: &str = "invalid";

// ---------------------------------------------------------------------------
// Field definitions
// ---------------------------------------------------------------------------

/// Input control kind for an editable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Multi-line text area.
    LongText,
    /// Numeric input; the raw text is coerced to an integer on submit.
    Number,
    /// Single-line input holding a URL.
    Url,
    /// Closed-choice selector over the listed options.
    Choice(&'static [&'static str]),
}

/// Binding between one record column and one labelled input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Column / form key.
    pub name: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    pub kind: FieldKind,
    /// Required fields are suffixed with `*` in labels and rejected when blank.
    pub required: bool,
}

impl FieldDef {
    /// Label as rendered, with the required marker.
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{}*", self.label)
        } else {
            self.label.to_string()
        }
    }

    /// Options for a choice field; empty for every other kind.
    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Choice(options) => options,
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Raw form values
// ---------------------------------------------------------------------------

/// Raw text values keyed by field name, as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for `field`; a missing key reads as the empty string.
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Stored value -> editable text. `None` becomes the empty string.
pub fn to_editable(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Editable text -> stored value. Surrounding whitespace is trimmed and a
/// blank result is stored as absent.
pub fn from_editable(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Editable free text -> stored value. Whitespace-only input is stored as
/// absent; anything else is kept exactly as entered.
pub fn from_editable_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Coerce numeric input text to an integer. Blank input is absent.
///
/// Sign is not checked here; range rules belong to the typed update.
pub fn parse_count(raw: &str) -> Result<Option<i64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| format!("'{trimmed}' is not a whole number"))
}

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// One field-level violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    /// [`CODE_REQUIRED`], [`CODE_INVALID`], or a `validator` rule code.
    pub code: String,
    pub message: String,
}

/// All violations found in one submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.0.push(FieldError {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        });
    }

    pub fn required(&mut self, field: &str, message: impl Into<String>) {
        self.push(field, CODE_REQUIRED, message);
    }

    pub fn invalid(&mut self, field: &str, message: impl Into<String>) {
        self.push(field, CODE_INVALID, message);
    }

    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Violations recorded against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn has_missing_required(&self) -> bool {
        self.0.iter().any(|e| e.code == CODE_REQUIRED)
    }

    /// Single-line inline message for the form footer.
    pub fn summary(&self) -> String {
        if self.has_missing_required() {
            return REQUIRED_FIELDS_MESSAGE.to_string();
        }
        self.0
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "Invalid input".to_string())
    }

    /// `Ok(value)` when no violations were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut collected: Vec<FieldError> = Vec::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                collected.push(FieldError {
                    field: field.to_string(),
                    code: err.code.to_string(),
                    message,
                });
            }
        }
        // HashMap order is unstable; keep messages deterministic.
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        Self(collected)
    }
}

// ---------------------------------------------------------------------------
// Editable entity contract
// ---------------------------------------------------------------------------

/// A record kind that can be edited through an [`EditController`].
///
/// [`EditController`]: crate::editor::EditController
pub trait EditableEntity: Clone + Send + Sync {
    /// Exactly the editable column set written back on submit.
    type Update: Clone + fmt::Debug + Send + Sync;

    /// Form configuration (e.g. which names are required).
    type Rules: Clone + Default + Send + Sync;

    /// Entity name used in logs and errors.
    const ENTITY: &'static str;

    /// Editable fields in form order.
    fn form_fields() -> &'static [FieldDef];

    /// Current stored values as editable text.
    fn prefill(&self) -> FormValues;

    /// The user allowed to mutate this record.
    fn owner(&self) -> UserId;

    /// Validate and convert raw values into a typed update.
    fn parse_form(&self, values: &FormValues, rules: &Self::Rules)
        -> Result<Self::Update, FieldErrors>;

    /// Address `update` to this record's row.
    fn record_update(&self, update: &Self::Update) -> RecordUpdate;

    /// Fold an acknowledged update into the cached record.
    fn apply(&mut self, update: Self::Update);
}
