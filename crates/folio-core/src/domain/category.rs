use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::{not_blank, validate_fields};
use crate::error::DomainError;

/// Category entity - a label that posts can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewCategory {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "The name may not be greater than 100 characters.")
    )]
    pub name: String,
}

impl NewCategory {
    /// Build from user input, trimming surrounding whitespace.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
        }
    }

    pub fn validate_fields(&self) -> Result<(), DomainError> {
        validate_fields(self, &["name"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_trims_and_validates() {
        let category = NewCategory::new("  News ");
        assert_eq!(category.name, "News");
        assert!(category.validate_fields().is_ok());

        assert!(matches!(
            NewCategory::new("   ").validate_fields(),
            Err(DomainError::Validation { field: "name", .. })
        ));
        assert!(NewCategory::new(&"x".repeat(100)).validate_fields().is_ok());
        assert!(NewCategory::new(&"x".repeat(101)).validate_fields().is_err());
    }
}
