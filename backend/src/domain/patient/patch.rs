//! Partial updates with explicit field presence.

use serde::{Deserialize, Deserializer};

use super::validation;
use super::PatientValidationError;

/// A field that is either left untouched or set to a new value.
///
/// Deserialising a present field yields [`Patch::Set`]; pair it with
/// `#[serde(default)]` so absent fields become [`Patch::Unset`]. An explicit
/// `null` fails to deserialise unless `T` itself accepts it.
///
/// # Examples
/// ```
/// use patient_registry::domain::Patch;
///
/// assert_eq!(Patch::Set(3).or(7), 3);
/// assert_eq!(Patch::<i32>::Unset.or(7), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Patch<T> {
    /// Leave the current value in place.
    Unset,
    /// Replace the current value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Patch<T> {
    /// Whether the field carries a new value.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Borrow the new value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// The new value, or `current` when unset.
    pub fn or(self, current: T) -> T {
        match self {
            Self::Set(value) => value,
            Self::Unset => current,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Set)
    }
}

/// Field changes for an existing record. The identifier is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientPatch {
    /// New name.
    pub name: Patch<String>,
    /// New city.
    pub city: Patch<String>,
    /// New age in whole years.
    pub age: Patch<i64>,
    /// New gender literal.
    pub gender: Patch<String>,
    /// New height in metres.
    pub height: Patch<f64>,
    /// New weight in kilograms.
    pub weight: Patch<f64>,
}

impl PatientPatch {
    /// Check every set field against its constraint. Unset fields are not
    /// inspected.
    ///
    /// # Examples
    /// ```
    /// use patient_registry::domain::{Patch, PatientPatch};
    ///
    /// let patch = PatientPatch {
    ///     age: Patch::Set(130),
    ///     ..PatientPatch::default()
    /// };
    /// let err = patch.validate().expect_err("age out of range");
    /// assert_eq!(err.field(), "age");
    /// ```
    pub fn validate(&self) -> Result<(), PatientValidationError> {
        if let Some(name) = self.name.as_set() {
            validation::non_empty(name, PatientValidationError::EmptyName)?;
        }
        if let Some(city) = self.city.as_set() {
            validation::non_empty(city, PatientValidationError::EmptyCity)?;
        }
        if let Some(age) = self.age.as_set() {
            validation::age(*age)?;
        }
        if let Some(gender) = self.gender.as_set() {
            gender.parse::<super::Gender>()?;
        }
        if let Some(height) = self.height.as_set() {
            validation::height(*height)?;
        }
        if let Some(weight) = self.weight.as_set() {
            validation::weight(*weight)?;
        }
        Ok(())
    }

    /// Whether height or weight changes, forcing new body metrics.
    pub fn changes_measurements(&self) -> bool {
        self.height.is_set() || self.weight.is_set()
    }
}
