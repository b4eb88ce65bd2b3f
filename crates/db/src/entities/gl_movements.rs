//! `SeaORM` Entity for GL movements. Append-only audit of GL balance changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DrCrFlag;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "gl_movements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The ledger line this movement belongs to.
    pub tran_id: String,
    pub gl_num: String,
    pub dr_cr_flag: DrCrFlag,
    pub tran_date: Date,
    pub value_date: Date,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub amount: Decimal,
    /// GL balance immediately after this movement was applied.
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub balance_after: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ledger_lines::Entity",
        from = "Column::TranId",
        to = "super::ledger_lines::Column::TranId"
    )]
    LedgerLines,
}

impl Related<super::ledger_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
