//! Aggregate statistics over the whole collection.
//!
//! These are the figures the dashboard shows on its overview page: record
//! count, mean age and BMI, and breakdowns by gender, verdict, and city.

use std::collections::BTreeMap;

use super::patient::round_to_tenths;
use super::{Gender, Patient, Verdict};

/// Summary of every stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionSummary {
    /// Number of records.
    pub total: usize,
    /// Mean age rounded to one decimal place; `None` when empty.
    pub average_age: Option<f64>,
    /// Mean BMI rounded to one decimal place; `None` when empty.
    pub average_bmi: Option<f64>,
    /// Record count per gender.
    pub by_gender: BTreeMap<Gender, usize>,
    /// Record count per verdict.
    pub by_verdict: BTreeMap<Verdict, usize>,
    /// Record count per city.
    pub by_city: BTreeMap<String, usize>,
}

impl CollectionSummary {
    /// Summarise `patients`.
    ///
    /// # Examples
    /// ```
    /// use patient_registry::domain::CollectionSummary;
    ///
    /// let summary = CollectionSummary::from_patients(std::iter::empty());
    /// assert_eq!(summary.total, 0);
    /// assert!(summary.average_bmi.is_none());
    /// ```
    pub fn from_patients<'a>(patients: impl IntoIterator<Item = &'a Patient>) -> Self {
        let mut summary = Self::default();
        let mut age_sum = 0.0;
        let mut bmi_sum = 0.0;

        for patient in patients {
            summary.total += 1;
            age_sum += f64::from(patient.age());
            bmi_sum += patient.metrics().bmi();
            *summary.by_gender.entry(patient.gender()).or_default() += 1;
            *summary
                .by_verdict
                .entry(patient.metrics().verdict())
                .or_default() += 1;
            *summary.by_city.entry(patient.city().to_owned()).or_default() += 1;
        }

        if summary.total > 0 {
            let count = summary.total as f64;
            summary.average_age = Some(round_to_tenths(age_sum / count));
            summary.average_bmi = Some(round_to_tenths(bmi_sum / count));
        }
        summary
    }
}
