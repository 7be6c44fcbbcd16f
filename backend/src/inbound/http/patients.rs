//! Patient record HTTP handlers.
//!
//! ```text
//! GET    /view
//! GET    /patient/{patient_id}
//! GET    /sort?sort_by=&order=
//! POST   /create
//! PUT    /edit/{patient_id}
//! DELETE /delete/{patient_id}
//! GET    /stats
//! ```
//!
//! Record bodies never carry the id; collections are keyed by it instead.
//!
//! Failures use the shared error body (`code`, `message`, optional `traceId`
//! and `details`). Clients that read a `detail` key must read `message`.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CollectionSummary, Patch, Patient, PatientDraft, PatientPatch, SortRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::info::MessageResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Request payload for creating a patient.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePatientRequest {
    #[schema(example = "P001")]
    pub id: String,
    #[schema(example = "Ananya Verma")]
    pub name: String,
    #[schema(example = "Guwahati")]
    pub city: String,
    #[schema(example = 28, minimum = 0, maximum = 119)]
    pub age: i64,
    #[schema(example = "female")]
    pub gender: String,
    /// Height in metres.
    #[schema(example = 1.65)]
    pub height: f64,
    /// Weight in kilograms.
    #[schema(example = 90.0)]
    pub weight: f64,
}

impl From<CreatePatientRequest> for PatientDraft {
    fn from(value: CreatePatientRequest) -> Self {
        Self {
            id: value.id,
            name: value.name,
            city: value.city,
            age: value.age,
            gender: value.gender,
            height: value.height,
            weight: value.weight,
        }
    }
}

/// Request payload for editing a patient. Omitted fields keep their values.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdatePatientRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub city: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub age: Patch<i64>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub gender: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub height: Patch<f64>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub weight: Patch<f64>,
}

impl From<UpdatePatientRequest> for PatientPatch {
    fn from(value: UpdatePatientRequest) -> Self {
        Self {
            name: value.name,
            city: value.city,
            age: value.age,
            gender: value.gender,
            height: value.height,
            weight: value.weight,
        }
    }
}

/// Stored record as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientResponse {
    pub name: String,
    pub city: String,
    pub age: u8,
    #[schema(example = "female")]
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    #[schema(example = 33.06)]
    pub bmi: f64,
    #[schema(example = "Overweight")]
    pub verdict: String,
}

impl From<&Patient> for PatientResponse {
    fn from(value: &Patient) -> Self {
        let metrics = value.metrics();
        Self {
            name: value.name().to_owned(),
            city: value.city().to_owned(),
            age: value.age(),
            gender: value.gender().as_str().to_owned(),
            height: value.height(),
            weight: value.weight(),
            bmi: metrics.bmi(),
            verdict: metrics.verdict().as_str().to_owned(),
        }
    }
}

/// Aggregate statistics over every stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_bmi: Option<f64>,
    pub by_gender: BTreeMap<String, usize>,
    pub by_verdict: BTreeMap<String, usize>,
    pub by_city: BTreeMap<String, usize>,
}

impl From<CollectionSummary> for SummaryResponse {
    fn from(value: CollectionSummary) -> Self {
        Self {
            total: value.total,
            average_age: value.average_age,
            average_bmi: value.average_bmi,
            by_gender: value
                .by_gender
                .into_iter()
                .map(|(gender, count)| (gender.as_str().to_owned(), count))
                .collect(),
            by_verdict: value
                .by_verdict
                .into_iter()
                .map(|(verdict, count)| (verdict.as_str().to_owned(), count))
                .collect(),
            by_city: value.by_city,
        }
    }
}

/// Query parameters for the sorted view.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// One of `height`, `weight`, `bmi`.
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    pub order: Option<String>,
}

/// List every stored record keyed by id.
#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "All records keyed by id", body = BTreeMap<String, PatientResponse>),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "viewPatients"
)]
#[get("/view")]
pub async fn view_patients(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let patients = state.patients_query.list().await?;
    let body: BTreeMap<&str, PatientResponse> = patients
        .iter()
        .map(|(id, patient)| (id.as_str(), PatientResponse::from(patient)))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch one record.
#[utoipa::path(
    get,
    path = "/patient/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient identifier", example = "P001")),
    responses(
        (status = 200, description = "Stored record", body = PatientResponse),
        (status = 404, description = "Patient not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatient"
)]
#[get("/patient/{patient_id}")]
pub async fn get_patient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let patient = state.patients_query.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PatientResponse::from(&patient)))
}

/// List every record ordered by height, weight, or BMI.
#[utoipa::path(
    get,
    path = "/sort",
    params(SortQuery),
    responses(
        (status = 200, description = "Sorted records", body = [PatientResponse]),
        (status = 400, description = "Invalid sort field or order", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "sortPatients"
)]
#[get("/sort")]
pub async fn sort_patients(
    state: web::Data<HttpState>,
    query: web::Query<SortQuery>,
) -> ApiResult<HttpResponse> {
    let SortQuery { sort_by, order } = query.into_inner();
    let sort_by = sort_by.ok_or_else(|| missing_field_error(FieldName::new("sort_by")))?;
    let patients = state
        .patients_query
        .sorted(SortRequest { sort_by, order })
        .await?;
    let body: Vec<PatientResponse> = patients.iter().map(PatientResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Create a record.
#[utoipa::path(
    post,
    path = "/create",
    request_body = CreatePatientRequest,
    responses(
        (status = 201, description = "Patient created", body = MessageResponse),
        (status = 400, description = "Invalid request, or a patient with this id already exists (code `conflict`)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "createPatient"
)]
#[post("/create")]
pub async fn create_patient(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePatientRequest>,
) -> ApiResult<HttpResponse> {
    state
        .patients
        .create(PatientDraft::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Patient created successfully")))
}

/// Update some fields of a record.
#[utoipa::path(
    put,
    path = "/edit/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient identifier", example = "P001")),
    request_body = UpdatePatientRequest,
    responses(
        (status = 200, description = "Patient updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "updatePatient"
)]
#[put("/edit/{patient_id}")]
pub async fn update_patient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePatientRequest>,
) -> ApiResult<HttpResponse> {
    state
        .patients
        .update(&path.into_inner(), PatientPatch::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Patient updated successfully")))
}

/// Remove a record.
#[utoipa::path(
    delete,
    path = "/delete/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient identifier", example = "P001")),
    responses(
        (status = 200, description = "Patient deleted", body = MessageResponse),
        (status = 404, description = "Patient not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "deletePatient"
)]
#[delete("/delete/{patient_id}")]
pub async fn delete_patient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.patients.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Patient deleted successfully")))
}

/// Aggregate statistics over the collection.
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Collection summary", body = SummaryResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "patientStats"
)]
#[get("/stats")]
pub async fn patient_stats(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let summary = state.patients_query.summary().await?;
    Ok(HttpResponse::Ok().json(SummaryResponse::from(summary)))
}

#[cfg(test)]
#[path = "patients_tests.rs"]
mod tests;
