// Settings validation

use crate::{ConfigError, Result};
use graphmark_core::is_valid_name;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reusable validation rules
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.is_empty() {
            return Err(ConfigError::ValidationError(format!("{} cannot be empty", field)));
        }
        Ok(())
    }

    pub fn in_range<T: PartialOrd + std::fmt::Display>(value: T, min: T, max: T, field: &str) -> Result<()> {
        if value < min || value > max {
            return Err(ConfigError::ValidationError(format!(
                "{} must be between {} and {}, got {}",
                field, min, max, value
            )));
        }
        Ok(())
    }

    /// The value must be usable as a GraphQL type or field name
    pub fn graphql_name(value: &str, field: &str) -> Result<()> {
        Self::not_empty(value, field)?;
        if !is_valid_name(value) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a valid GraphQL name, got `{}`",
                field, value
            )));
        }
        Ok(())
    }
}
