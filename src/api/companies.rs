use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::{validation, StatusResponse},
    app_state::AppState,
    database::models::{companies, company_industries, industries, invoices},
    errors::AppError,
};

// --- DTOs (Data Transfer Objects) ---

#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
pub struct CreateCompanyDto {
    /// Derived from `name` when omitted.
    pub code: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
pub struct UpdateCompanyDto {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CompanyListResponse {
    pub companies: Vec<companies::Model>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub company: companies::Model,
}

/// A company with the ids of its invoices and the industries it belongs to.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CompanyDetails {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub invoices: Vec<i32>,
    pub industries: Vec<industries::Model>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CompanyDetailsResponse {
    pub company: CompanyDetails,
}

fn company_not_found(code: &str) -> AppError {
    AppError::NotFound(format!("Cannot find company with code {}", code))
}

// --- Route Handlers ---

#[utoipa::path(
    get,
    path = "/companies",
    tag = "Companies",
    responses(
        (status = 200, description = "All companies", body = CompanyListResponse),
        (status = 404, description = "No companies stored")
    )
)]
#[get("")]
pub async fn get_companies(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let companies = companies::Entity::find().all(&data.db).await?;
    if companies.is_empty() {
        return Err(AppError::NotFound("Cannot find any companies".to_string()));
    }

    Ok(HttpResponse::Ok().json(CompanyListResponse { companies }))
}

#[utoipa::path(
    get,
    path = "/companies/{code}",
    tag = "Companies",
    params(
        ("code" = String, Path, description = "Company code")
    ),
    responses(
        (status = 200, description = "Company with its invoice ids and industries", body = CompanyDetailsResponse),
        (status = 404, description = "Company not found")
    )
)]
#[get("/{code}")]
pub async fn get_company(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let company = companies::Entity::find_by_id(code.clone())
        .one(&data.db)
        .await?
        .ok_or_else(|| company_not_found(&code))?;

    let invoice_ids = invoices::Entity::find()
        .filter(invoices::Column::CompCode.eq(code.as_str()))
        .order_by_asc(invoices::Column::Id)
        .all(&data.db)
        .await?
        .into_iter()
        .map(|invoice| invoice.id)
        .collect();

    let industries = industries::Entity::find()
        .inner_join(company_industries::Entity)
        .filter(company_industries::Column::CompanyCode.eq(code.as_str()))
        .order_by_asc(industries::Column::IndCode)
        .all(&data.db)
        .await?;

    let details = CompanyDetails {
        code: company.code,
        name: company.name,
        description: company.description,
        invoices: invoice_ids,
        industries,
    };

    Ok(HttpResponse::Ok().json(CompanyDetailsResponse { company: details }))
}

#[utoipa::path(
    post,
    path = "/companies",
    tag = "Companies",
    request_body = CreateCompanyDto,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Malformed body or no usable code"),
        (status = 500, description = "Storage rejected the insert, e.g. duplicate code")
    )
)]
#[post("")]
pub async fn create_company(
    data: web::Data<AppState>,
    body: web::Json<CreateCompanyDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();
    let code = validation::resolve_company_code(dto.code.as_deref(), &dto.name).ok_or_else(
        || AppError::InvalidInput(format!("Cannot derive a company code from name '{}'", dto.name)),
    )?;

    let company = companies::ActiveModel {
        code: Set(code),
        name: Set(dto.name),
        description: Set(dto.description),
    };

    let created = company.insert(&data.db).await?;
    log::info!("Created company {}", created.code);
    Ok(HttpResponse::Created().json(CompanyResponse { company: created }))
}

#[utoipa::path(
    put,
    path = "/companies/{code}",
    tag = "Companies",
    params(
        ("code" = String, Path, description = "Company code")
    ),
    request_body = UpdateCompanyDto,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 404, description = "Company not found")
    )
)]
#[put("/{code}")]
pub async fn update_company(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateCompanyDto>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let dto = body.into_inner();

    let company = companies::ActiveModel {
        code: Unchanged(code.clone()),
        name: Set(dto.name),
        description: Set(dto.description),
    };

    // UPDATE ... RETURNING yields no row when the code is unknown.
    let updated = company.update(&data.db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => company_not_found(&code),
        other => AppError::from(other),
    })?;

    Ok(HttpResponse::Ok().json(CompanyResponse { company: updated }))
}

#[utoipa::path(
    delete,
    path = "/companies/{code}",
    tag = "Companies",
    params(
        ("code" = String, Path, description = "Company code")
    ),
    responses(
        (status = 200, description = "Company deleted", body = StatusResponse),
        (status = 404, description = "Company not found")
    )
)]
#[delete("/{code}")]
pub async fn delete_company(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let result = companies::Entity::delete_by_id(code.clone())
        .exec(&data.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(company_not_found(&code));
    }

    log::info!("Deleted company {}", code);
    Ok(HttpResponse::Ok().json(StatusResponse::deleted()))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/companies")
            .service(get_companies)
            .service(get_company)
            .service(create_company)
            .service(update_company)
            .service(delete_company),
    );
}
