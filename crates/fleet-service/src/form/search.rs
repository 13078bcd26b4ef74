//! Listing search forms.
//!
//! Each form carries one optional text field. Validation always succeeds:
//! an empty or missing value simply means "no filter".

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;

use serde::Serialize;

use super::{Form, FormErrors};

/// Describes which field a search form filters on.
pub trait SearchField {
    const FORM: &'static str;
    const FIELD: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManufacturerName {}

impl SearchField for ManufacturerName {
    const FORM: &'static str = "ManufacturerSearchForm";
    const FIELD: &'static str = "name";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarModel {}

impl SearchField for CarModel {
    const FORM: &'static str = "CarSearchForm";
    const FIELD: &'static str = "model";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverUsername {}

impl SearchField for DriverUsername {
    const FORM: &'static str = "DriverSearchForm";
    const FIELD: &'static str = "username";
}

pub type ManufacturerSearchForm = SearchForm<ManufacturerName>;
pub type CarSearchForm = SearchForm<CarModel>;
pub type DriverSearchForm = SearchForm<DriverUsername>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm<F: SearchField> {
    value: String,
    field: PhantomData<F>,
}

impl<F: SearchField> Default for SearchForm<F> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<F: SearchField> SearchForm<F> {
    /// Binds the last submitted value, as read from the query string.
    #[must_use]
    pub fn new(value: Option<String>) -> Self {
        Self {
            value: value.unwrap_or_default(),
            field: PhantomData,
        }
    }

    /// Binds from submitted key/value data, picking out this form's field.
    #[must_use]
    pub fn bind(data: &HashMap<String, String>) -> Self {
        Self::new(data.get(F::FIELD).cloned())
    }

    /// The submitted value exactly as received.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The value to filter on, `None` when the field was left empty.
    #[must_use]
    pub fn filter_value(&self) -> Option<String> {
        self.clean().ok().flatten()
    }

    /// ## Summary
    /// Context rendered with a listing so the form redisplays the last filter.
    #[must_use]
    pub fn context(&self) -> SearchFormContext {
        SearchFormContext {
            form: F::FORM,
            field: F::FIELD,
            initial: BTreeMap::from([(F::FIELD, self.value.clone())]),
        }
    }
}

impl<F: SearchField> Form for SearchForm<F> {
    const NAME: &'static str = F::FORM;

    type Cleaned = Option<String>;

    fn clean(&self) -> Result<Self::Cleaned, FormErrors> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFormContext {
    pub form: &'static str,
    pub field: &'static str,
    pub initial: BTreeMap<&'static str, String>,
}
