use std::collections::HashMap;

pub mod product;
pub mod profile;

pub use product::{validate_product_data, ImageFile, ProductInput};
pub use profile::{validate_profile, ProfileInput};

/// Outcome of a single field validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl FieldCheck {
    pub fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self { is_valid: false, error: Some(error.into()) }
    }
}

/// Aggregated validation outcome, keyed by field name. Submission is
/// blocked whenever any field failed; the map feeds both the form UI and
/// the API's `field_errors` payload.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: HashMap<String, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn record(&mut self, field: &str, check: FieldCheck) {
        if let Some(error) = check.error {
            self.errors.insert(field.to_string(), error);
        }
    }

    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
