use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "industry")]
#[schema(as = Industry)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub ind_code: String,
    #[sea_orm(unique)]
    pub industry: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::company_industries::Entity")]
    CompanyIndustries,
}

impl Related<super::company_industries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyIndustries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
