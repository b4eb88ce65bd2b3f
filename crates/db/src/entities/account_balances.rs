//! `SeaORM` Entity for per-account balance rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_balances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_no: String,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub current_balance: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub available_balance: Decimal,
    pub last_updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
