//! Field constraints shared by full records and partial updates.

use serde_json::{Value, json};
use thiserror::Error;

use super::AGE_LIMIT;
use crate::domain::Error;

/// Constraint violations raised while validating a record or patch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatientValidationError {
    /// Identifier is empty after trimming.
    #[error("id must not be empty")]
    EmptyId,
    /// Identifier carries leading or trailing whitespace.
    #[error("id must not contain surrounding whitespace")]
    IdSurroundingWhitespace,
    /// Name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,
    /// City is empty after trimming.
    #[error("city must not be empty")]
    EmptyCity,
    /// Age falls outside `0..120`.
    #[error("age must be at least 0 and less than 120")]
    AgeOutOfRange {
        /// Rejected age.
        value: i64,
    },
    /// Gender is not one of the accepted literals.
    #[error("gender must be one of male, female, other")]
    UnknownGender {
        /// Rejected literal.
        value: String,
    },
    /// Height is zero, negative, or not finite.
    #[error("height must be greater than 0")]
    NonPositiveHeight {
        /// Rejected height.
        value: f64,
    },
    /// Weight is zero, negative, or not finite.
    #[error("weight must be greater than 0")]
    NonPositiveWeight {
        /// Rejected weight.
        value: f64,
    },
}

impl PatientValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::IdSurroundingWhitespace => "id",
            Self::EmptyName => "name",
            Self::EmptyCity => "city",
            Self::AgeOutOfRange { .. } => "age",
            Self::UnknownGender { .. } => "gender",
            Self::NonPositiveHeight { .. } => "height",
            Self::NonPositiveWeight { .. } => "weight",
        }
    }

    /// Machine-readable name of the violated constraint.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::EmptyName | Self::EmptyCity => "empty_value",
            Self::IdSurroundingWhitespace => "surrounding_whitespace",
            Self::AgeOutOfRange { .. } => "out_of_range",
            Self::UnknownGender { .. } => "unknown_literal",
            Self::NonPositiveHeight { .. } | Self::NonPositiveWeight { .. } => "not_positive",
        }
    }

    fn rejected_value(&self) -> Option<Value> {
        match self {
            Self::AgeOutOfRange { value } => Some(json!(value)),
            Self::UnknownGender { value } => Some(json!(value)),
            Self::NonPositiveHeight { value } | Self::NonPositiveWeight { value } => {
                Some(json!(value))
            }
            _ => None,
        }
    }
}

impl From<PatientValidationError> for Error {
    fn from(error: PatientValidationError) -> Self {
        let mut details = json!({
            "field": error.field(),
            "code": error.code(),
        });
        if let (Some(value), Some(map)) = (error.rejected_value(), details.as_object_mut()) {
            map.insert("value".to_owned(), value);
        }
        Error::invalid_request(error.to_string()).with_details(details)
    }
}

pub(crate) fn non_empty(
    value: &str,
    error: PatientValidationError,
) -> Result<(), PatientValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}

pub(crate) fn age(value: i64) -> Result<u8, PatientValidationError> {
    if !(0..AGE_LIMIT).contains(&value) {
        return Err(PatientValidationError::AgeOutOfRange { value });
    }
    u8::try_from(value).map_err(|_| PatientValidationError::AgeOutOfRange { value })
}

fn positive(
    value: f64,
    error: fn(f64) -> PatientValidationError,
) -> Result<(), PatientValidationError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(error(value))
}

pub(crate) fn height(value: f64) -> Result<(), PatientValidationError> {
    positive(value, |value| PatientValidationError::NonPositiveHeight { value })
}

pub(crate) fn weight(value: f64) -> Result<(), PatientValidationError> {
    positive(value, |value| PatientValidationError::NonPositiveWeight { value })
}
