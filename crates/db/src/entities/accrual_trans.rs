//! `SeaORM` Entity for interest accrual transactions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AccrualStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accrual_trans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub accr_id: i64,
    pub tran_id: String,
    pub account_no: String,
    pub accrual_date: Date,
    #[sea_orm(column_type = "Decimal(Some((10, 4)))")]
    pub interest_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub amount: Decimal,
    pub status: AccrualStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::accrual_gl_movements::Entity")]
    AccrualGlMovements,
}

impl Related<super::accrual_gl_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccrualGlMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
