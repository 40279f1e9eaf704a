use actix_web::{get, post, web, HttpResponse};
use sea_orm::{
    ActiveModelTrait, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    RelationTrait, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    app_state::AppState,
    database::models::{companies, company_industries, industries},
    errors::AppError,
};

// --- DTOs (Data Transfer Objects) ---

#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
pub struct CreateIndustryDto {
    pub ind_code: String,
    pub industry: String,
}

#[derive(Deserialize, Serialize, ToSchema, Clone, Debug)]
pub struct AssociateCompanyDto {
    pub company_code: String,
}

/// One row per (industry, company) association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct IndustryCompany {
    pub ind_code: String,
    pub industry: String,
    pub code: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct IndustryListResponse {
    pub industries: Vec<IndustryCompany>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct IndustryResponse {
    pub industry: industries::Model,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AssociationResponse {
    pub industry: company_industries::Model,
}

// --- Route Handlers ---

#[utoipa::path(
    get,
    path = "/industries",
    tag = "Industries",
    responses(
        (status = 200, description = "Industry/company associations", body = IndustryListResponse),
        (status = 404, description = "No associations stored")
    )
)]
#[get("")]
pub async fn get_industries(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let industries = industries::Entity::find()
        .select_only()
        .column(industries::Column::IndCode)
        .column(industries::Column::Industry)
        .column_as(companies::Column::Code, "code")
        .join(JoinType::InnerJoin, industries::Relation::CompanyIndustries.def())
        .join(JoinType::InnerJoin, company_industries::Relation::Company.def())
        .order_by_asc(industries::Column::IndCode)
        .order_by_asc(companies::Column::Code)
        .into_model::<IndustryCompany>()
        .all(&data.db)
        .await?;

    if industries.is_empty() {
        return Err(AppError::NotFound("Cannot find any industries".to_string()));
    }

    Ok(HttpResponse::Ok().json(IndustryListResponse { industries }))
}

#[utoipa::path(
    post,
    path = "/industries",
    tag = "Industries",
    request_body = CreateIndustryDto,
    responses(
        (status = 201, description = "Industry created", body = IndustryResponse),
        (status = 400, description = "Malformed body")
    )
)]
#[post("")]
pub async fn create_industry(
    data: web::Data<AppState>,
    body: web::Json<CreateIndustryDto>,
) -> Result<HttpResponse, AppError> {
    let dto = body.into_inner();
    let industry = industries::ActiveModel {
        ind_code: Set(dto.ind_code),
        industry: Set(dto.industry),
    };

    let created = industry.insert(&data.db).await?;
    log::info!("Created industry {}", created.ind_code);
    Ok(HttpResponse::Created().json(IndustryResponse { industry: created }))
}

#[utoipa::path(
    post,
    path = "/industries/{industry_code}",
    tag = "Industries",
    params(
        ("industry_code" = String, Path, description = "Industry code")
    ),
    request_body = AssociateCompanyDto,
    responses(
        (status = 201, description = "Company linked to the industry", body = AssociationResponse),
        (status = 404, description = "Industry or company not found")
    )
)]
#[post("/{industry_code}")]
pub async fn associate_company(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<AssociateCompanyDto>,
) -> Result<HttpResponse, AppError> {
    let industry_code = path.into_inner();
    let dto = body.into_inner();

    industries::Entity::find_by_id(industry_code.clone())
        .one(&data.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Cannot find industry with code {}", industry_code))
        })?;

    companies::Entity::find_by_id(dto.company_code.clone())
        .one(&data.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Cannot find company with code {}", dto.company_code))
        })?;

    let link = company_industries::ActiveModel {
        company_code: Set(dto.company_code),
        industry_code: Set(industry_code),
    };

    let created = link.insert(&data.db).await?;
    log::info!(
        "Linked company {} to industry {}",
        created.company_code,
        created.industry_code
    );
    Ok(HttpResponse::Created().json(AssociationResponse { industry: created }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/industries")
            .service(get_industries)
            .service(create_industry)
            .service(associate_company),
    );
}
