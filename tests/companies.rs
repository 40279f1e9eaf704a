#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use biztime::database::models::{companies, industries, invoices};
use common::*;
use serde_json::{json, Value};

#[actix_web::test]
async fn lists_all_companies() {
    let db = mock()
        .append_query_results([vec![apple(), ibm()]])
        .into_connection();
    let app = init_app!(app_state(db));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/companies").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let companies = body["companies"].as_array().unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0]["code"], "apple");
    assert_eq!(companies[1]["description"], "Big blue.");
}

#[actix_web::test]
async fn empty_company_list_is_not_found() {
    let db = mock()
        .append_query_results([Vec::<companies::Model>::new()])
        .into_connection();
    let app = init_app!(app_state(db));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/companies").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["status"], 404);
    assert_eq!(body["error"]["message"], "Cannot find any companies");
}

#[actix_web::test]
async fn company_detail_carries_invoice_ids_and_industries() {
    let apple_invoices: Vec<invoices::Model> = sample_invoices()
        .into_iter()
        .filter(|inv| inv.comp_code == "apple")
        .collect();
    let db = mock()
        .append_query_results([vec![apple()]])
        .append_query_results([apple_invoices])
        .append_query_results([vec![tech()]])
        .into_connection();
    let app = init_app!(app_state(db));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/companies/apple").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["company"]["code"], "apple");
    assert_eq!(body["company"]["name"], "Apple Computer");
    assert_eq!(body["company"]["invoices"], json!([1, 2, 3]));
    assert_eq!(
        body["company"]["industries"],
        json!([{"ind_code": "tech", "industry": "Technology"}])
    );
}

#[actix_web::test]
async fn company_without_invoices_has_empty_list() {
    let db = mock()
        .append_query_results([vec![ibm()]])
        .append_query_results([Vec::<invoices::Model>::new()])
        .append_query_results([Vec::<industries::Model>::new()])
        .into_connection();
    let app = init_app!(app_state(db));

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/companies/ibm").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["company"]["invoices"], json!([]));
    assert_eq!(body["company"]["industries"], json!([]));
}

#[actix_web::test]
async fn unknown_company_is_not_found() {
    let db = mock()
        .append_query_results([Vec::<companies::Model>::new()])
        .into_connection();
    let app = init_app!(app_state(db));

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/companies/hp").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Cannot find company with code hp");
}

#[actix_web::test]
async fn create_with_explicit_code() {
    let hp = company("hp", "hewlitt packard", "hardware maker");
    let db = mock().append_query_results([vec![hp]]).into_connection();
    let state = app_state(db);
    let app = init_app!(state.clone());

    let req = test::TestRequest::post()
        .uri("/companies")
        .set_json(json!({"code": "hp", "name": "hewlitt packard", "description": "hardware maker"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"company": {"code": "hp", "name": "hewlitt packard", "description": "hardware maker"}})
    );
    assert!(statement_log(&state).contains("INSERT INTO"));
}

#[actix_web::test]
async fn create_without_code_inserts_the_slug() {
    let created = company("hewlett-packard", "Hewlett Packard", "hardware maker");
    let db = mock().append_query_results([vec![created]]).into_connection();
    let state = app_state(db);
    let app = init_app!(state.clone());

    let req = test::TestRequest::post()
        .uri("/companies")
        .set_json(json!({"name": "Hewlett Packard", "description": "hardware maker"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["company"]["code"], "hewlett-packard");
    assert!(statement_log(&state).contains("hewlett-packard"));
}

#[actix_web::test]
async fn create_derives_a_code_from_a_non_latin_name() {
    let created = company("яндекс", "Яндекс", "search engine");
    let db = mock().append_query_results([vec![created]]).into_connection();
    let app = init_app!(app_state(db));

    let req = test::TestRequest::post()
        .uri("/companies")
        .set_json(json!({"name": "Яндекс", "description": "search engine"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["company"]["code"], "яндекс");
}

#[actix_web::test]
async fn create_rejects_name_without_usable_code() {
    let app = init_app!(app_state(empty_db()));

    let req = test::TestRequest::post()
        .uri("/companies")
        .set_json(json!({"name": "???", "description": "nothing to slug"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["status"], 400);
}

#[actix_web::test]
async fn create_with_missing_name_is_bad_request() {
    let app = init_app!(app_state(empty_db()));

    let req = test::TestRequest::post()
        .uri("/companies")
        .set_json(json!({"code": "hp"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"].as_str().unwrap().contains("name"));
}

#[actix_web::test]
async fn duplicate_code_surfaces_as_server_error() {
    let db = mock()
        .append_query_errors([sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"companies_pkey\"".into(),
        )])
        .into_connection();
    let app = init_app!(app_state(db));

    let req = test::TestRequest::post()
        .uri("/companies")
        .set_json(json!({"code": "apple", "name": "Apple again", "description": "dup"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["status"], 500);
}

#[actix_web::test]
async fn update_returns_the_new_fields() {
    let updated = company("apple", "Google Inc.", "They do the searches");
    let db = mock().append_query_results([vec![updated]]).into_connection();
    let app = init_app!(app_state(db));

    let req = test::TestRequest::put()
        .uri("/companies/apple")
        .set_json(json!({"name": "Google Inc.", "description": "They do the searches"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["company"]["code"], "apple");
    assert_eq!(body["company"]["name"], "Google Inc.");
}

#[actix_web::test]
async fn update_of_unknown_company_is_not_found() {
    let db = mock()
        .append_query_results([Vec::<companies::Model>::new()])
        .into_connection();
    let app = init_app!(app_state(db));

    let req = test::TestRequest::put()
        .uri("/companies/google")
        .set_json(json!({"name": "Google Inc.", "description": "They do the searches"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_twice_is_not_idempotent() {
    let db = mock()
        .append_exec_results([affected(1), affected(0)])
        .into_connection();
    let app = init_app!(app_state(db));

    let first = test::call_service(
        &app,
        test::TestRequest::delete().uri("/companies/apple").to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let body: Value = test::read_body_json(first).await;
    assert_eq!(body, json!({"status": "deleted"}));

    let second = test::call_service(
        &app,
        test::TestRequest::delete().uri("/companies/apple").to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}
