//! Sorted views over the patient collection.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::json;
use thiserror::Error;

use super::{Error, Patient};

/// Numeric field a collection can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Height in metres.
    Height,
    /// Weight in kilograms.
    Weight,
    /// Derived body-mass index.
    Bmi,
}

impl SortField {
    /// Sort key for `patient`.
    pub fn key(self, patient: &Patient) -> f64 {
        match self {
            Self::Height => patient.height(),
            Self::Weight => patient.weight(),
            Self::Bmi => patient.metrics().bmi(),
        }
    }
}

impl FromStr for SortField {
    type Err = SortValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(Self::Height),
            "weight" => Ok(Self::Weight),
            "bmi" => Ok(Self::Bmi),
            _ => Err(SortValidationError::UnknownField {
                value: s.to_owned(),
            }),
        }
    }
}

/// Direction of a sorted view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl FromStr for SortOrder {
    type Err = SortValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(SortValidationError::UnknownOrder {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Rejections raised while parsing a sort request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortValidationError {
    /// Field is not `height`, `weight`, or `bmi`.
    #[error("Invalid field, select from height, weight or bmi")]
    UnknownField {
        /// Rejected literal.
        value: String,
    },
    /// Order is neither `asc` nor `desc`.
    #[error("Invalid order, select between asc or desc")]
    UnknownOrder {
        /// Rejected literal.
        value: String,
    },
}

impl From<SortValidationError> for Error {
    fn from(error: SortValidationError) -> Self {
        let (field, value) = match &error {
            SortValidationError::UnknownField { value } => ("sort_by", value),
            SortValidationError::UnknownOrder { value } => ("order", value),
        };
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": field,
            "value": value,
            "code": "unknown_literal",
        }))
    }
}

/// Raw sort parameters as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    /// Field literal.
    pub sort_by: String,
    /// Order literal; `None` means ascending.
    pub order: Option<String>,
}

/// Parsed sort parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Key to order by.
    pub field: SortField,
    /// Direction.
    pub order: SortOrder,
}

impl TryFrom<&SortRequest> for SortSpec {
    type Error = SortValidationError;

    fn try_from(request: &SortRequest) -> Result<Self, Self::Error> {
        let field = request.sort_by.parse()?;
        let order = request
            .order
            .as_deref()
            .map(str::parse)
            .transpose()?
            .unwrap_or_default();
        Ok(Self { field, order })
    }
}

impl SortSpec {
    /// Order `patients` by this spec. Ties keep their input order.
    ///
    /// # Examples
    /// ```
    /// use patient_registry::domain::{PatientDraft, SortField, SortOrder, SortSpec};
    ///
    /// let make = |id: &str, weight: f64| {
    ///     PatientDraft {
    ///         id: id.into(),
    ///         name: "A".into(),
    ///         city: "X".into(),
    ///         age: 40,
    ///         gender: "female".into(),
    ///         height: 1.0,
    ///         weight,
    ///     }
    ///     .validate()
    ///     .expect("valid draft")
    /// };
    /// let spec = SortSpec { field: SortField::Bmi, order: SortOrder::Desc };
    /// let sorted = spec.apply(vec![make("a", 18.0), make("b", 31.0), make("c", 25.0)]);
    /// let bmis: Vec<f64> = sorted.iter().map(|p| p.metrics().bmi()).collect();
    /// assert_eq!(bmis, vec![31.0, 25.0, 18.0]);
    /// ```
    pub fn apply(self, mut patients: Vec<Patient>) -> Vec<Patient> {
        patients.sort_by(|a, b| self.compare(a, b));
        patients
    }

    fn compare(self, a: &Patient, b: &Patient) -> Ordering {
        let ordering = self.field.key(a).total_cmp(&self.field.key(b));
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}
