//! Informational endpoints.
//!
//! ```text
//! GET /
//! GET /about
//! ```

use actix_web::{HttpResponse, get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Single-message response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Patient created successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Service greeting.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service greeting", body = MessageResponse)),
    tags = ["info"],
    operation_id = "hello"
)]
#[get("/")]
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Patient Management System API"))
}

/// Short description of the service.
#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "Service description", body = MessageResponse)),
    tags = ["info"],
    operation_id = "about"
)]
#[get("/about")]
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new(
        "This is an API for patient management system",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use rstest::rstest;

    #[rstest]
    #[case("/", "Patient Management System API")]
    #[case("/about", "This is an API for patient management system")]
    #[actix_web::test]
    async fn info_endpoints_return_messages(#[case] uri: &str, #[case] expected: &str) {
        let app = test::init_service(App::new().service(hello).service(about)).await;
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: MessageResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, MessageResponse::new(expected));
    }
}
