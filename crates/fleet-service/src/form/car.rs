//! Car create/update form.
//!
//! Ids arrive as strings; whether the referenced rows exist is checked by the
//! car service against the store, not here.

use serde::{Deserialize, Serialize};

use super::{Form, FormErrors, INVALID_CHOICE_MESSAGE, clean_text, require};

pub const MODEL_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarForm {
    pub model: String,
    pub manufacturer: String,
    pub drivers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarData {
    pub model: String,
    pub manufacturer_id: uuid::Uuid,
    pub driver_ids: Vec<uuid::Uuid>,
}

impl Form for CarForm {
    const NAME: &'static str = "CarForm";

    type Cleaned = CarData;

    fn clean(&self) -> Result<Self::Cleaned, FormErrors> {
        let mut errors = FormErrors::new();

        let model = clean_text(&self.model);
        if require(&mut errors, "model", &model) && model.chars().count() > MODEL_MAX_LENGTH {
            errors.add(
                "model",
                format!("Ensure this value has at most {MODEL_MAX_LENGTH} characters."),
            );
        }

        let manufacturer = clean_text(&self.manufacturer);
        let manufacturer_id = if require(&mut errors, "manufacturer", &manufacturer) {
            let parsed = uuid::Uuid::parse_str(&manufacturer).ok();
            if parsed.is_none() {
                errors.add("manufacturer", INVALID_CHOICE_MESSAGE);
            }
            parsed
        } else {
            None
        };

        let mut driver_ids = Vec::with_capacity(self.drivers.len());
        for raw in &self.drivers {
            match uuid::Uuid::parse_str(raw.trim()) {
                Ok(id) if !driver_ids.contains(&id) => driver_ids.push(id),
                Ok(_) => {}
                Err(_) => errors.add(
                    "drivers",
                    format!("Select a valid choice. {raw} is not one of the available choices."),
                ),
            }
        }

        match manufacturer_id {
            Some(manufacturer_id) if errors.is_empty() => Ok(CarData {
                model,
                manufacturer_id,
                driver_ids,
            }),
            _ => Err(errors),
        }
    }
}
