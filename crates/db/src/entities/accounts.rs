//! `SeaORM` Entity for the accounts master table (consumed, not owned).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AccountStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_no: String,
    pub acct_name: String,
    pub gl_num: String,
    pub sub_product_id: i32,
    pub status: AccountStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sub_products::Entity",
        from = "Column::SubProductId",
        to = "super::sub_products::Column::Id"
    )]
    SubProducts,
}

impl Related<super::sub_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
