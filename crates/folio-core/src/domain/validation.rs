//! Field rules on top of `validator`, reported as [`DomainError::Validation`].

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::DomainError;

/// Fails when the value is empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("This field is required.".into());
        return Err(error);
    }

    Ok(())
}

/// Validate `value` and report the first failing field, checked in `fields` order.
pub fn validate_fields<T: Validate>(value: &T, fields: &[&'static str]) -> Result<(), DomainError> {
    value.validate().map_err(|errors| first_failure(&errors, fields))
}

fn first_failure(errors: &ValidationErrors, fields: &[&'static str]) -> DomainError {
    let failing = errors.field_errors();

    for field in fields {
        let Some(field_errors) = failing
            .iter()
            .find(|(name, _)| name.to_string() == *field)
            .map(|(_, errs)| *errs)
        else {
            continue;
        };

        // A blank value also fails its length rule; "required" reads better.
        let Some(error) = field_errors
            .iter()
            .find(|e| e.code == "required")
            .or_else(|| field_errors.first())
        else {
            continue;
        };

        let message = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("The {field} field is invalid."));
        return DomainError::validation(field, message);
    }

    DomainError::validation(fields.first().copied().unwrap_or("input"), errors.to_string())
}
