//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod patient_command;
mod patient_query;
mod patient_repository;

#[cfg(test)]
pub use patient_command::MockPatientCommand;
pub use patient_command::PatientCommand;
#[cfg(test)]
pub use patient_query::MockPatientQuery;
pub use patient_query::PatientQuery;
#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::{PatientRepository, PatientRepositoryError};
