//! End-to-end HTTP tests against the JSON file store.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use camino::{Utf8Path, Utf8PathBuf};
use patient_registry::Trace;
use patient_registry::domain::TRACE_ID_HEADER;
use patient_registry::inbound::http::patients::{
    create_patient, delete_patient, get_patient, patient_stats, sort_patients, update_patient,
    view_patients,
};
use patient_registry::inbound::http::state::HttpState;
use patient_registry::inbound::http::validation::{json_config, query_config};
use patient_registry::outbound::persistence::JsonFilePatientRepository;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

struct Store {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl Store {
    fn state(&self) -> HttpState {
        let repository = JsonFilePatientRepository::open(&self.path).expect("open store");
        HttpState::from_repository(Arc::new(repository))
    }

    fn contents(&self) -> Value {
        let raw = std::fs::read_to_string(&self.path).expect("read store file");
        serde_json::from_str(&raw).expect("store file is JSON")
    }
}

#[fixture]
fn store() -> Store {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = Utf8Path::from_path(dir.path()).expect("utf-8 tempdir");
    let path = root.join("patient.json");
    Store { _dir: dir, path }
}

macro_rules! init_app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(json_config())
                .app_data(query_config())
                .wrap(Trace)
                .service(view_patients)
                .service(get_patient)
                .service(sort_patients)
                .service(create_patient)
                .service(update_patient)
                .service(delete_patient)
                .service(patient_stats),
        )
        .await
    };
}

fn body(id: &str, weight: f64) -> Value {
    json!({
        "id": id,
        "name": "Ananya Verma",
        "city": "Guwahati",
        "age": 28,
        "gender": "female",
        "height": 1.75,
        "weight": weight,
    })
}

#[rstest]
#[actix_web::test]
async fn created_records_are_stored_keyed_by_id(store: Store) {
    let app = init_app!(store.state());

    let req = actix_test::TestRequest::post()
        .uri("/create")
        .set_json(body("P001", 70.0))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let contents = store.contents();
    let record = contents.get("P001").expect("record keyed by id");
    assert!(record.get("id").is_none());
    assert_eq!(record.get("bmi"), Some(&json!(22.86)));
    assert_eq!(record.get("verdict"), Some(&json!("Normal")));
}

#[rstest]
#[actix_web::test]
async fn collection_survives_a_fresh_repository(store: Store) {
    {
        let app = init_app!(store.state());
        for (id, weight) in [("P001", 60.0), ("P002", 90.0)] {
            let req = actix_test::TestRequest::post()
                .uri("/create")
                .set_json(body(id, weight))
                .to_request();
            let res = actix_test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }
        let req = actix_test::TestRequest::put()
            .uri("/edit/P001")
            .set_json(json!({ "weight": 100.0 }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let app = init_app!(store.state());
    let req = actix_test::TestRequest::get()
        .uri("/patient/P001")
        .to_request();
    let fetched: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched.get("bmi"), Some(&json!(32.65)));
    assert_eq!(fetched.get("verdict"), Some(&json!("Overweight")));
    assert_eq!(fetched.get("name"), Some(&json!("Ananya Verma")));

    let req = actix_test::TestRequest::get()
        .uri("/sort?sort_by=weight&order=desc")
        .to_request();
    let sorted: Vec<Value> = actix_test::call_and_read_body_json(&app, req).await;
    let weights: Vec<f64> = sorted
        .iter()
        .filter_map(|p| p.get("weight").and_then(Value::as_f64))
        .collect();
    assert_eq!(weights, vec![100.0, 90.0]);
}

#[rstest]
#[actix_web::test]
async fn deleted_records_leave_the_file(store: Store) {
    let app = init_app!(store.state());
    let req = actix_test::TestRequest::post()
        .uri("/create")
        .set_json(body("P001", 70.0))
        .to_request();
    actix_test::call_service(&app, req).await;

    let req = actix_test::TestRequest::delete()
        .uri("/delete/P001")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(store.contents(), json!({}));

    let req = actix_test::TestRequest::get().uri("/view").to_request();
    let listed: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!({}));
}

#[rstest]
#[actix_web::test]
async fn rejected_requests_do_not_touch_the_file(store: Store) {
    let app = init_app!(store.state());
    let mut invalid = body("P001", 70.0);
    invalid["age"] = json!(150);

    let req = actix_test::TestRequest::post()
        .uri("/create")
        .set_json(invalid)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    assert!(!store.path.exists());

    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload.get("code"), Some(&json!("invalid_request")));
    assert_eq!(
        payload.pointer("/details/field"),
        Some(&json!("age"))
    );
}
