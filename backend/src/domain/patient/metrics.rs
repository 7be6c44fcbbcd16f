//! Body-mass-index derivation and classification.

use std::fmt;

/// Classification bucket derived from a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    /// BMI below 18.5.
    Underweight,
    /// BMI in `[18.5, 30)`.
    Normal,
    /// BMI strictly above 30.
    Overweight,
    /// BMI of exactly 30.
    Obese,
}

impl Verdict {
    /// Classify a rounded BMI value.
    ///
    /// Thresholds are evaluated in order and the first match wins. A BMI of
    /// exactly `30.0` matches neither the `Normal` nor the `Overweight` arm
    /// and lands on `Obese`.
    ///
    /// # Examples
    /// ```
    /// use patient_registry::domain::Verdict;
    ///
    /// assert_eq!(Verdict::classify(18.49), Verdict::Underweight);
    /// assert_eq!(Verdict::classify(18.5), Verdict::Normal);
    /// assert_eq!(Verdict::classify(30.0), Verdict::Obese);
    /// assert_eq!(Verdict::classify(30.01), Verdict::Overweight);
    /// ```
    #[must_use]
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 30.0 {
            Self::Normal
        } else if bmi > 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Label used in stored records and API payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived body metrics for one set of measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMetrics {
    bmi: f64,
    verdict: Verdict,
}

impl BodyMetrics {
    /// Derive BMI and verdict from height (metres) and weight (kilograms).
    ///
    /// Callers validate that both inputs are positive and finite.
    ///
    /// # Examples
    /// ```
    /// use patient_registry::domain::{BodyMetrics, Verdict};
    ///
    /// let metrics = BodyMetrics::from_measurements(1.75, 70.0);
    /// assert_eq!(metrics.bmi(), 22.86);
    /// assert_eq!(metrics.verdict(), Verdict::Normal);
    /// ```
    #[must_use]
    pub fn from_measurements(height: f64, weight: f64) -> Self {
        let bmi = round_to_hundredths(weight / (height * height));
        Self {
            bmi,
            verdict: Verdict::classify(bmi),
        }
    }

    /// BMI rounded to two decimal places.
    #[must_use]
    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    /// Classification of [`Self::bmi`].
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
}

/// Round the exact binary value of `value` to `places` decimals, ties to even.
fn round_to_places(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    round_to_places(value, 2)
}

pub(crate) fn round_to_tenths(value: f64) -> f64 {
    round_to_places(value, 1)
}
