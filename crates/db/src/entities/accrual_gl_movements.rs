//! `SeaORM` Entity for the GL legs of interest accruals.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccrualStatus, DrCrFlag};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accrual_gl_movements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub accr_id: i64,
    pub gl_num: String,
    pub dr_cr_flag: DrCrFlag,
    pub accrual_date: Date,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub amount: Decimal,
    pub status: AccrualStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accrual_trans::Entity",
        from = "Column::AccrId",
        to = "super::accrual_trans::Column::AccrId"
    )]
    AccrualTrans,
}

impl Related<super::accrual_trans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccrualTrans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
