//! Driver account forms.

use fleet_core::validation::{PASSWORD_MIN_LENGTH, validate_license_number, validate_username};
use serde::{Deserialize, Serialize};

use super::{Form, FormErrors, clean_text, require};

pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn't match.";

/// Account creation with a mandatory license number.
///
/// Passwords are never echoed back when the form is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverCreationForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,
    pub license_number: String,
    pub first_name: String,
    pub last_name: String,
}

impl Form for DriverCreationForm {
    const NAME: &'static str = "DriverCreationForm";

    /// The submitted fields with text inputs trimmed; passwords are kept as typed.
    type Cleaned = Self;

    fn clean(&self) -> Result<Self::Cleaned, FormErrors> {
        let mut errors = FormErrors::new();
        let cleaned = Self {
            username: clean_text(&self.username),
            password1: self.password1.clone(),
            password2: self.password2.clone(),
            license_number: clean_text(&self.license_number),
            first_name: clean_text(&self.first_name),
            last_name: clean_text(&self.last_name),
        };

        if let Err(err) = validate_username(&cleaned.username) {
            errors.add("username", err.to_string());
        }

        let has_password1 = require(&mut errors, "password1", &self.password1);
        let has_password2 = require(&mut errors, "password2", &self.password2);
        if has_password1 && has_password2 {
            if self.password1 != self.password2 {
                errors.add("password2", PASSWORD_MISMATCH_MESSAGE);
            } else if self.password2.chars().count() < PASSWORD_MIN_LENGTH {
                errors.add(
                    "password2",
                    format!(
                        "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
                    ),
                );
            }
        }

        if require(&mut errors, "license_number", &cleaned.license_number)
            && let Err(err) = validate_license_number(&cleaned.license_number)
        {
            errors.add("license_number", err.to_string());
        }

        errors.into_result(cleaned)
    }
}

/// Replaces the license number of an existing driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverLicenseUpdateForm {
    pub license_number: String,
}

impl Form for DriverLicenseUpdateForm {
    const NAME: &'static str = "DriverLicenseUpdateForm";

    type Cleaned = String;

    fn clean(&self) -> Result<Self::Cleaned, FormErrors> {
        let mut errors = FormErrors::new();
        let license_number = clean_text(&self.license_number);

        if require(&mut errors, "license_number", &license_number)
            && let Err(err) = validate_license_number(&license_number)
        {
            errors.add("license_number", err.to_string());
        }

        errors.into_result(license_number)
    }
}
