//! `SeaORM` Entity for per-account daily accrual records (denormalized).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_accruals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_no: String,
    pub accrual_date: Date,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub interest_amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
