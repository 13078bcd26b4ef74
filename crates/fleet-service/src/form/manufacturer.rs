//! Manufacturer create/update form.

use serde::{Deserialize, Serialize};

use super::{Form, FormErrors, clean_text, require};

pub const NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManufacturerForm {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerData {
    pub name: String,
    pub country: String,
}

impl Form for ManufacturerForm {
    const NAME: &'static str = "ManufacturerForm";

    type Cleaned = ManufacturerData;

    fn clean(&self) -> Result<Self::Cleaned, FormErrors> {
        let mut errors = FormErrors::new();

        let name = clean_text(&self.name);
        if require(&mut errors, "name", &name) && name.chars().count() > NAME_MAX_LENGTH {
            errors.add(
                "name",
                format!("Ensure this value has at most {NAME_MAX_LENGTH} characters."),
            );
        }

        let country = clean_text(&self.country);
        if country.chars().count() > NAME_MAX_LENGTH {
            errors.add(
                "country",
                format!("Ensure this value has at most {NAME_MAX_LENGTH} characters."),
            );
        }

        errors.into_result(ManufacturerData { name, country })
    }
}
