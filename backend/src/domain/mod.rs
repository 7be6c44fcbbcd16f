//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed patient records and the use cases the HTTP
//! adapter drives. Keep types immutable once validated and document invariants
//! in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Patient (alias to `patient::Patient`) — validated record with metrics.
//! - PatientService — implements the patient command and query ports.

pub mod error;
pub mod patient;
mod patient_service;
pub mod ports;
pub mod sort;
pub mod summary;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::patient::{
    AGE_LIMIT, BodyMetrics, Gender, Patch, Patient, PatientCollection, PatientDraft, PatientId,
    PatientPatch, PatientValidationError, Verdict,
};
pub use self::patient_service::PatientService;
pub use self::sort::{SortField, SortOrder, SortRequest, SortSpec, SortValidationError};
pub use self::summary::CollectionSummary;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use patient_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Patient not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
