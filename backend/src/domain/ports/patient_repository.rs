//! Port for whole-collection patient persistence.
//!
//! The [`PatientRepository`] trait loads and replaces the entire record set in
//! one call. Adapters decide where the collection lives (a JSON file, memory)
//! but never apply partial writes.

use async_trait::async_trait;

use crate::domain::PatientCollection;

use super::define_port_error;

define_port_error! {
    /// Errors raised by patient repository adapters.
    pub enum PatientRepositoryError {
        /// The backing store could not be read or written.
        Io { message: String } =>
            "patient store i/o failed: {message}",
        /// Stored content could not be encoded or decoded.
        Serialization { message: String } =>
            "patient store serialization failed: {message}",
    }
}

/// Port for loading and saving the patient collection.
///
/// # Semantics
///
/// - [`load_all`](Self::load_all) returns every stored record keyed by id. A
///   store that has never been written loads as an empty collection.
/// - [`save_all`](Self::save_all) replaces the stored collection with the one
///   given. Records absent from `patients` are gone afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Load the full collection.
    async fn load_all(&self) -> Result<PatientCollection, PatientRepositoryError>;

    /// Replace the stored collection with `patients`.
    async fn save_all(&self, patients: &PatientCollection) -> Result<(), PatientRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PatientRepositoryError::io("disk full"), "patient store i/o failed: disk full")]
    #[case(
        PatientRepositoryError::serialization("expected value at line 1"),
        "patient store serialization failed: expected value at line 1"
    )]
    fn errors_format_with_their_cause(
        #[case] error: PatientRepositoryError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }
}
