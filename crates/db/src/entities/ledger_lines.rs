//! `SeaORM` Entity for ledger transaction lines. Write-once.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{DrCrFlag, TranStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_lines")]
pub struct Model {
    /// Line id: `{tranId}-{lineSeq}`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub tran_id: String,
    pub line_seq: i32,
    pub tran_date: Date,
    pub value_date: Date,
    pub dr_cr_flag: DrCrFlag,
    pub tran_status: TranStatus,
    pub account_no: String,
    pub tran_ccy: String,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub fcy_amt: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub exchange_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub lcy_amt: Decimal,
    pub narration: Option<String>,
    pub udf1: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountNo",
        to = "super::accounts::Column::AccountNo"
    )]
    Accounts,
    #[sea_orm(has_many = "super::gl_movements::Entity")]
    GlMovements,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::gl_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GlMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
