//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use patient_registry::Trace;
#[cfg(debug_assertions)]
use patient_registry::doc::ApiDoc;
use patient_registry::inbound::http::health::{HealthState, live, ready};
use patient_registry::inbound::http::info::{about, hello};
use patient_registry::inbound::http::patients::{
    create_patient, delete_patient, get_patient, patient_stats, sort_patients, update_patient,
    view_patients,
};
use patient_registry::inbound::http::state::HttpState;
use patient_registry::inbound::http::validation::{json_config, query_config};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(hello)
        .service(about)
        .service(view_patients)
        .service(get_patient)
        .service(sort_patients)
        .service(create_patient)
        .service(update_patient)
        .service(delete_patient)
        .service(patient_stats)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The patient store is opened before binding so a missing data directory
/// fails startup instead of the first request.
///
/// # Errors
/// Propagates [`std::io::Error`] when the store cannot be opened or binding
/// the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let repository = config
        .store
        .open()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let http_state = web::Data::new(HttpState::from_repository(repository));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(config.bind_addr.as_str())?
        .run();

    health_state.mark_ready();
    Ok(server)
}
