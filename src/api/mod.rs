use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::{database::models, errors::AppError};

pub mod companies;
pub mod health;
pub mod industries;
pub mod invoices;
pub mod middleware;
pub mod validation;

pub const DEFAULT_JSON_LIMIT: usize = 256 * 1024;

/// Body of successful deletes: `{"status": "deleted"}`.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_string(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        // Companies
        companies::get_companies,
        companies::get_company,
        companies::create_company,
        companies::update_company,
        companies::delete_company,
        // Invoices
        invoices::get_invoices,
        invoices::get_invoice,
        invoices::create_invoice,
        invoices::update_invoice,
        invoices::delete_invoice,
        // Industries
        industries::get_industries,
        industries::create_industry,
        industries::associate_company,
    ),
    components(
        schemas(
            models::companies::Model,
            models::invoices::Model,
            models::industries::Model,
            models::company_industries::Model,
            StatusResponse,
            health::HealthResponse,
            companies::CreateCompanyDto,
            companies::UpdateCompanyDto,
            companies::CompanyListResponse,
            companies::CompanyResponse,
            companies::CompanyDetails,
            companies::CompanyDetailsResponse,
            invoices::CreateInvoiceDto,
            invoices::UpdateInvoiceDto,
            invoices::InvoiceListResponse,
            invoices::InvoiceResponse,
            industries::CreateIndustryDto,
            industries::AssociateCompanyDto,
            industries::IndustryCompany,
            industries::IndustryListResponse,
            industries::IndustryResponse,
            industries::AssociationResponse
        )
    ),
    tags(
        (name = "Companies", description = "Company management endpoints"),
        (name = "Invoices", description = "Invoice management endpoints"),
        (name = "Industries", description = "Industries and company/industry links"),
        (name = "Health", description = "Liveness check")
    )
)]
pub struct ApiDoc;

/// Registers every resource scope plus the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_with_body_limit(cfg, DEFAULT_JSON_LIMIT);
}

pub fn configure_with_body_limit(cfg: &mut web::ServiceConfig, json_limit: usize) {
    // Extractor failures go through the same envelope as handler errors.
    let json_config = web::JsonConfig::default()
        .limit(json_limit)
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, req| {
            AppError::NotFound(format!("Cannot find resource at {}: {}", req.path(), err)).into()
        });

    cfg.app_data(json_config)
        .app_data(path_config)
        .configure(health::init_routes)
        .configure(companies::init_routes)
        .configure(invoices::init_routes)
        .configure(industries::init_routes);
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}
