//! Patient persistence adapters.
//!
//! Both adapters implement [`PatientRepository`](crate::domain::ports::PatientRepository)
//! with whole-collection semantics and are interchangeable behind the port.
//!
//! - [`JsonFilePatientRepository`] keeps the collection in one JSON document
//!   keyed by patient id and replaces it atomically on every save.
//! - [`InMemoryPatientRepository`] keeps the collection in process memory.
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use patient_registry::outbound::persistence::JsonFilePatientRepository;
//!
//! let repo = JsonFilePatientRepository::open(Utf8Path::new("patient.json"))
//!     .expect("open patient store");
//! ```

mod atomic_write;
mod json_file_repository;
mod memory_repository;
mod models;

pub use json_file_repository::JsonFilePatientRepository;
pub use memory_repository::InMemoryPatientRepository;
