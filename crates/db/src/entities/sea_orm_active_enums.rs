//! String-backed enums shared across the ledger entities.

use corebank_core::ledger::{DrCr, TranStatus as CoreTranStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Debit/credit flag as stored (`D` / `C`).
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum DrCrFlag {
    #[sea_orm(string_value = "D")]
    Debit,
    #[sea_orm(string_value = "C")]
    Credit,
}

impl From<DrCr> for DrCrFlag {
    fn from(value: DrCr) -> Self {
        match value {
            DrCr::Debit => Self::Debit,
            DrCr::Credit => Self::Credit,
        }
    }
}

impl From<DrCrFlag> for DrCr {
    fn from(value: DrCrFlag) -> Self {
        match value {
            DrCrFlag::Debit => Self::Debit,
            DrCrFlag::Credit => Self::Credit,
        }
    }
}

/// Lifecycle of a posted ledger line.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum TranStatus {
    #[sea_orm(string_value = "E")]
    Entry,
    #[sea_orm(string_value = "P")]
    Posted,
    #[sea_orm(string_value = "V")]
    Verified,
}

impl From<TranStatus> for CoreTranStatus {
    fn from(value: TranStatus) -> Self {
        match value {
            TranStatus::Entry => Self::Entry,
            TranStatus::Posted => Self::Posted,
            TranStatus::Verified => Self::Verified,
        }
    }
}

/// Lifecycle of an interest accrual.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum AccrualStatus {
    #[sea_orm(string_value = "N")]
    Pending,
    #[sea_orm(string_value = "P")]
    Posted,
    #[sea_orm(string_value = "V")]
    Verified,
}

/// Account master status.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum AccountStatus {
    #[sea_orm(string_value = "A")]
    Active,
    #[sea_orm(string_value = "I")]
    Inactive,
    #[sea_orm(string_value = "C")]
    Closed,
}

/// Sub-product master status.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum SubProductStatus {
    #[sea_orm(string_value = "A")]
    Active,
    #[sea_orm(string_value = "I")]
    Inactive,
}
