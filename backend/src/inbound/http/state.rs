//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::PatientService;
use crate::domain::ports::{PatientCommand, PatientQuery, PatientRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub patients: Arc<dyn PatientCommand>,
    pub patients_query: Arc<dyn PatientQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(patients: Arc<dyn PatientCommand>, patients_query: Arc<dyn PatientQuery>) -> Self {
        Self {
            patients,
            patients_query,
        }
    }

    /// Construct state backed by a [`PatientService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use patient_registry::inbound::http::state::HttpState;
    /// use patient_registry::outbound::persistence::InMemoryPatientRepository;
    ///
    /// let state = HttpState::from_repository(Arc::new(InMemoryPatientRepository::default()));
    /// # let _ = state;
    /// ```
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: PatientRepository + ?Sized + 'static,
    {
        let service = PatientService::new(repository);
        Self::new(Arc::new(service.clone()), Arc::new(service))
    }
}
