//! `SeaORM` entity definitions for the ledger schema.

pub mod sea_orm_active_enums;

pub mod account_accruals;
pub mod account_balances;
pub mod account_sequences;
pub mod accounts;
pub mod accrual_gl_movements;
pub mod accrual_trans;
pub mod gl_balances;
pub mod gl_movements;
pub mod gl_setup;
pub mod ledger_lines;
pub mod sub_products;
