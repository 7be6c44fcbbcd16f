//! Patient record aggregate.
//!
//! A [`Patient`] is only ever built through validation: either from a complete
//! [`PatientDraft`] on create, or by merging a [`PatientPatch`] into an
//! existing record. Both paths recompute [`BodyMetrics`], so `bmi` and
//! `verdict` always reflect the current height and weight.

mod metrics;
mod patch;
mod validation;

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub use self::metrics::{BodyMetrics, Verdict};
pub(crate) use self::metrics::round_to_tenths;
pub use self::patch::{Patch, PatientPatch};
pub use self::validation::PatientValidationError;

/// Exclusive upper bound on a patient's age in years.
pub const AGE_LIMIT: i64 = 120;

/// Whole collection of records keyed by identifier.
pub type PatientCollection = BTreeMap<PatientId, Patient>;

/// Unique patient identifier; the sole lookup key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Validate and construct an identifier.
    ///
    /// # Examples
    /// ```
    /// use patient_registry::domain::PatientId;
    ///
    /// let id = PatientId::new("P001").expect("valid id");
    /// assert_eq!(id.as_str(), "P001");
    /// assert!(PatientId::new(" P001").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, PatientValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PatientValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(PatientValidationError::IdSurroundingWhitespace);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Borrow<str> for PatientId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender recorded for a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    /// `male`
    Male,
    /// `female`
    Female,
    /// `other`
    Other,
}

impl Gender {
    /// Lower-case literal used in payloads and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = PatientValidationError;

    /// Parse the literal set. `Other` is accepted for records written by
    /// earlier clients that capitalised it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" | "Other" => Ok(Self::Other),
            _ => Err(PatientValidationError::UnknownGender {
                value: s.to_owned(),
            }),
        }
    }
}

/// Unvalidated values for a complete record.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientDraft {
    /// Requested identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// City of residence.
    pub city: String,
    /// Age in whole years.
    pub age: i64,
    /// Gender literal.
    pub gender: String,
    /// Height in metres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
}

impl PatientDraft {
    /// Validate every field and derive body metrics.
    ///
    /// # Examples
    /// ```
    /// use patient_registry::domain::{PatientDraft, Verdict};
    ///
    /// let patient = PatientDraft {
    ///     id: "P001".into(),
    ///     name: "A".into(),
    ///     city: "X".into(),
    ///     age: 30,
    ///     gender: "male".into(),
    ///     height: 1.75,
    ///     weight: 70.0,
    /// }
    /// .validate()
    /// .expect("valid draft");
    /// assert_eq!(patient.metrics().verdict(), Verdict::Normal);
    /// ```
    pub fn validate(self) -> Result<Patient, PatientValidationError> {
        let Self {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        } = self;

        let id = PatientId::new(id)?;
        validation::non_empty(&name, PatientValidationError::EmptyName)?;
        validation::non_empty(&city, PatientValidationError::EmptyCity)?;
        let age = validation::age(age)?;
        let gender = gender.parse()?;
        validation::height(height)?;
        validation::weight(weight)?;

        Ok(Patient {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
            metrics: BodyMetrics::from_measurements(height, weight),
        })
    }
}

/// Validated patient record with derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    id: PatientId,
    name: String,
    city: String,
    age: u8,
    gender: Gender,
    height: f64,
    weight: f64,
    metrics: BodyMetrics,
}

impl Patient {
    /// Identifier.
    pub fn id(&self) -> &PatientId {
        &self.id
    }

    /// Full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// City of residence.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Age in whole years.
    pub fn age(&self) -> u8 {
        self.age
    }

    /// Gender.
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Height in metres.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Derived BMI and verdict.
    pub fn metrics(&self) -> BodyMetrics {
        self.metrics
    }

    /// Draft holding this record's current values.
    pub fn to_draft(&self) -> PatientDraft {
        PatientDraft {
            id: self.id.as_str().to_owned(),
            name: self.name.clone(),
            city: self.city.clone(),
            age: i64::from(self.age),
            gender: self.gender.as_str().to_owned(),
            height: self.height,
            weight: self.weight,
        }
    }

    /// Merge `patch` into this record and revalidate the result.
    ///
    /// Unset fields keep their current values. The merged record passes full
    /// validation before it is returned, and its metrics are recomputed.
    ///
    /// # Examples
    /// ```
    /// use patient_registry::domain::{Patch, PatientDraft, PatientPatch, Verdict};
    ///
    /// let patient = PatientDraft {
    ///     id: "P001".into(),
    ///     name: "A".into(),
    ///     city: "X".into(),
    ///     age: 30,
    ///     gender: "male".into(),
    ///     height: 1.75,
    ///     weight: 70.0,
    /// }
    /// .validate()
    /// .expect("valid draft");
    ///
    /// let patch = PatientPatch {
    ///     weight: Patch::Set(100.0),
    ///     ..PatientPatch::default()
    /// };
    /// let updated = patient.apply(patch).expect("valid patch");
    /// assert_eq!(updated.metrics().bmi(), 32.65);
    /// assert_eq!(updated.metrics().verdict(), Verdict::Overweight);
    /// assert_eq!(updated.name(), "A");
    /// ```
    pub fn apply(&self, patch: PatientPatch) -> Result<Self, PatientValidationError> {
        let PatientPatch {
            name,
            city,
            age,
            gender,
            height,
            weight,
        } = patch;
        let current = self.to_draft();

        PatientDraft {
            id: current.id,
            name: name.or(current.name),
            city: city.or(current.city),
            age: age.or(current.age),
            gender: gender.or(current.gender),
            height: height.or(current.height),
            weight: weight.or(current.weight),
        }
        .validate()
    }
}

#[cfg(test)]
mod tests;
