use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, IntoActiveModel, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::StatusResponse,
    app_state::AppState,
    database::models::invoices,
    errors::AppError,
};

// --- DTOs (Data Transfer Objects) ---

#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
pub struct CreateInvoiceDto {
    pub comp_code: String,
    pub amt: f64,
}

#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
pub struct UpdateInvoiceDto {
    pub amt: f64,
    /// When omitted the paid state and paid date stay as they are.
    pub paid: Option<bool>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct InvoiceListResponse {
    pub invoices: Vec<invoices::Model>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct InvoiceResponse {
    pub invoice: invoices::Model,
}

/// Paid date an invoice should carry after an update.
///
/// Paying an invoice that has no paid date stamps `today`, unpaying clears
/// the date, and an invoice that stays paid keeps its original date.
pub fn next_paid_date(
    current: Option<NaiveDate>,
    paid: bool,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match (current, paid) {
        (_, false) => None,
        (None, true) => Some(today),
        (Some(date), true) => Some(date),
    }
}

fn invoice_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Cannot find invoice with id of {}", id))
}

// --- Route Handlers ---

#[utoipa::path(
    get,
    path = "/invoices",
    tag = "Invoices",
    responses(
        (status = 200, description = "All invoices ordered by id", body = InvoiceListResponse),
        (status = 404, description = "No invoices stored")
    )
)]
#[get("")]
pub async fn get_invoices(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let invoices = invoices::Entity::find()
        .order_by_asc(invoices::Column::Id)
        .all(&data.db)
        .await?;
    if invoices.is_empty() {
        return Err(AppError::NotFound("Cannot find any invoices".to_string()));
    }

    Ok(HttpResponse::Ok().json(InvoiceListResponse { invoices }))
}

#[utoipa::path(
    get,
    path = "/invoices/{id}",
    tag = "Invoices",
    params(
        ("id" = i32, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice found", body = InvoiceResponse),
        (status = 404, description = "Invoice not found")
    )
)]
#[get("/{id}")]
pub async fn get_invoice(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let invoice = invoices::Entity::find_by_id(id)
        .one(&data.db)
        .await?
        .ok_or_else(|| invoice_not_found(id))?;

    Ok(HttpResponse::Ok().json(InvoiceResponse { invoice }))
}

#[utoipa::path(
    post,
    path = "/invoices",
    tag = "Invoices",
    request_body = CreateInvoiceDto,
    responses(
        (status = 201, description = "Invoice created unpaid", body = InvoiceResponse),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Storage rejected the insert, e.g. unknown company")
    )
)]
#[post("")]
pub async fn create_invoice(
    data: web::Data<AppState>,
    body: web::Json<CreateInvoiceDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();

    // add_date is left to the column default.
    let invoice = invoices::ActiveModel {
        comp_code: Set(dto.comp_code),
        amt: Set(dto.amt),
        paid: Set(false),
        paid_date: Set(None),
        ..Default::default()
    };

    let created = invoice.insert(&data.db).await?;
    log::info!("Created invoice {} for {}", created.id, created.comp_code);
    Ok(HttpResponse::Created().json(InvoiceResponse { invoice: created }))
}

#[utoipa::path(
    put,
    path = "/invoices/{id}",
    tag = "Invoices",
    params(
        ("id" = i32, Path, description = "Invoice ID")
    ),
    request_body = UpdateInvoiceDto,
    responses(
        (status = 200, description = "Invoice updated", body = InvoiceResponse),
        (status = 404, description = "Invoice not found")
    )
)]
#[put("/{id}")]
pub async fn update_invoice(
    data: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateInvoiceDto>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let dto = body.into_inner();

    let current = invoices::Entity::find_by_id(id)
        .one(&data.db)
        .await?
        .ok_or_else(|| invoice_not_found(id))?;

    let current_paid_date = current.paid_date;
    let mut invoice = current.into_active_model();
    invoice.amt = Set(dto.amt);
    if let Some(paid) = dto.paid {
        invoice.paid = Set(paid);
        invoice.paid_date = Set(next_paid_date(
            current_paid_date,
            paid,
            data.config.today(),
        ));
    }

    // Not atomic with the read above: a concurrent delete surfaces here as no returned row.
    let updated = invoice.update(&data.db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => invoice_not_found(id),
        other => AppError::from(other),
    })?;

    Ok(HttpResponse::Ok().json(InvoiceResponse { invoice: updated }))
}

#[utoipa::path(
    delete,
    path = "/invoices/{id}",
    tag = "Invoices",
    params(
        ("id" = i32, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice deleted", body = StatusResponse),
        (status = 404, description = "Invoice not found")
    )
)]
#[delete("/{id}")]
pub async fn delete_invoice(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = invoices::Entity::delete_by_id(id).exec(&data.db).await?;

    if result.rows_affected == 0 {
        return Err(invoice_not_found(id));
    }

    log::info!("Deleted invoice {}", id);
    Ok(HttpResponse::Ok().json(StatusResponse::deleted()))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .service(get_invoices)
            .service(get_invoice)
            .service(create_invoice)
            .service(update_invoice)
            .service(delete_invoice),
    );
}
