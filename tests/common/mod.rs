#![allow(dead_code, unused_macros)]

use actix_web::web;
use biztime::{
    app_state::AppState,
    config::Config,
    database::models::{companies, industries, invoices},
};
use chrono::NaiveDate;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockDatabaseTrait, MockExecResult};

/// Builds the full router over `$state` the same way `main` does, minus the server-only middleware.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state)
                .configure(biztime::api::configure)
                .default_service(actix_web::web::to(biztime::api::not_found)),
        )
        .await
    };
}

pub fn mock() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

pub fn empty_db() -> DatabaseConnection {
    mock().into_connection()
}

/// Wraps a mock connection the way `main` wraps the real pool. Keep a clone to inspect the mock afterwards.
pub fn app_state(db: DatabaseConnection) -> web::Data<AppState> {
    web::Data::new(AppState::new(db, Config::default()))
}

pub fn affected(rows: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: rows,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn company(code: &str, name: &str, description: &str) -> companies::Model {
    companies::Model {
        code: code.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
    }
}

pub fn apple() -> companies::Model {
    company("apple", "Apple Computer", "Maker of OSX.")
}

pub fn ibm() -> companies::Model {
    company("ibm", "IBM", "Big blue.")
}

pub fn invoice(id: i32, comp_code: &str, amt: f64) -> invoices::Model {
    invoices::Model {
        id,
        comp_code: comp_code.to_string(),
        amt,
        paid: false,
        add_date: date(2026, 1, 2),
        paid_date: None,
    }
}

pub fn paid_invoice(id: i32, comp_code: &str, amt: f64, paid_on: NaiveDate) -> invoices::Model {
    invoices::Model {
        paid: true,
        paid_date: Some(paid_on),
        ..invoice(id, comp_code, amt)
    }
}

/// The four invoices loaded by the sample data.
pub fn sample_invoices() -> Vec<invoices::Model> {
    vec![
        invoice(1, "apple", 100.0),
        invoice(2, "apple", 200.0),
        paid_invoice(3, "apple", 300.0, date(2018, 1, 1)),
        invoice(4, "ibm", 400.0),
    ]
}

pub fn tech() -> industries::Model {
    industries::Model {
        ind_code: "tech".to_string(),
        industry: "Technology".to_string(),
    }
}

/// Debug dump of every statement the mock received so far, for substring assertions.
pub fn statement_log(state: &web::Data<AppState>) -> String {
    let log = state
        .db
        .as_mock_connection()
        .get_mocker_mutex()
        .lock()
        .unwrap()
        .drain_transaction_log();
    format!("{:?}", log)
}
