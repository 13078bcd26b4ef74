//! Form binding and validation.
//!
//! A form holds the raw submitted values. `clean` either returns the
//! normalized data or a set of field-level errors; nothing is persisted by a
//! form on its own.
//!
//! ## Module Organization
//!
//! - `search`: single-field listing filters (always valid)
//! - `driver`: account creation and license number update
//! - `manufacturer`: manufacturer create/update
//! - `car`: car create/update with driver assignment
//! - `login`: credentials for the login page

pub mod car;
pub mod driver;
pub mod login;
pub mod manufacturer;
pub mod search;

use std::collections::BTreeMap;

use serde::Serialize;

/// Key under which errors not tied to a single field are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Field name to error messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages reported for `field`, empty if it has none.
    #[must_use]
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// ## Summary
    /// Returns `value` if no errors were collected.
    ///
    /// ## Errors
    /// Returns `self` when at least one error was added.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A bound form that validates into `Cleaned`.
pub trait Form {
    /// Name reported to clients alongside the form context.
    const NAME: &'static str;

    type Cleaned;

    /// ## Errors
    /// Returns the field-level errors when the submitted data is invalid.
    fn clean(&self) -> Result<Self::Cleaned, FormErrors>;

    fn is_valid(&self) -> bool {
        self.clean().is_ok()
    }
}

/// Trims a text input the way text fields are normalized before validation.
pub(crate) fn clean_text(value: &str) -> String {
    value.trim().to_string()
}

/// Records a required-field error when `value` is empty.
pub(crate) fn require(errors: &mut FormErrors, field: &str, value: &str) -> bool {
    if value.is_empty() {
        errors.add(field, REQUIRED_MESSAGE);
        false
    } else {
        true
    }
}
