//! Initial schema: masters, balances, ledger, accruals, sequences.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS account_sequences, account_accruals, \
             accrual_gl_movements, accrual_trans, gl_movements, ledger_lines, \
             gl_balances, account_balances, accounts, sub_products, gl_setup CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- GL chart of accounts (consumed by the ledger, maintained elsewhere)
CREATE TABLE gl_setup (
    gl_num VARCHAR(9) PRIMARY KEY,
    gl_name VARCHAR(100) NOT NULL,
    layer_id INTEGER NOT NULL,
    parent_gl_num VARCHAR(9) REFERENCES gl_setup(gl_num)
);

-- Sub-product master (consumed)
CREATE TABLE sub_products (
    id SERIAL PRIMARY KEY,
    code VARCHAR(10) NOT NULL UNIQUE,
    name VARCHAR(100) NOT NULL,
    cum_gl_num VARCHAR(9) NOT NULL REFERENCES gl_setup(gl_num),
    interest_rate NUMERIC(10, 4),
    status CHAR(1) NOT NULL DEFAULT 'A',
    CONSTRAINT chk_sub_product_status CHECK (status IN ('A', 'I'))
);

-- Account master (consumed)
CREATE TABLE accounts (
    account_no VARCHAR(13) PRIMARY KEY,
    acct_name VARCHAR(100) NOT NULL,
    gl_num VARCHAR(9) NOT NULL REFERENCES gl_setup(gl_num),
    sub_product_id INTEGER NOT NULL REFERENCES sub_products(id),
    status CHAR(1) NOT NULL DEFAULT 'A',
    CONSTRAINT chk_account_status CHECK (status IN ('A', 'I', 'C'))
);

-- Per-account balance row, one per account, updated under row lock
CREATE TABLE account_balances (
    account_no VARCHAR(13) PRIMARY KEY REFERENCES accounts(account_no),
    current_balance NUMERIC(20, 2) NOT NULL DEFAULT 0,
    available_balance NUMERIC(20, 2) NOT NULL DEFAULT 0,
    last_updated TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Per-GL balance row, updated under row lock
CREATE TABLE gl_balances (
    gl_num VARCHAR(9) PRIMARY KEY REFERENCES gl_setup(gl_num),
    current_balance NUMERIC(20, 2) NOT NULL DEFAULT 0,
    last_updated TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Ledger lines, write-once; tran_id carries the line suffix
CREATE TABLE ledger_lines (
    tran_id VARCHAR(30) PRIMARY KEY,
    line_seq INTEGER NOT NULL,
    tran_date DATE NOT NULL,
    value_date DATE NOT NULL,
    dr_cr_flag CHAR(1) NOT NULL CHECK (dr_cr_flag IN ('D', 'C')),
    tran_status CHAR(1) NOT NULL CHECK (tran_status IN ('E', 'P', 'V')),
    account_no VARCHAR(13) NOT NULL REFERENCES accounts(account_no),
    tran_ccy CHAR(3) NOT NULL,
    fcy_amt NUMERIC(20, 2) NOT NULL,
    exchange_rate NUMERIC(20, 8) NOT NULL,
    lcy_amt NUMERIC(20, 2) NOT NULL,
    narration VARCHAR(255),
    udf1 VARCHAR(100)
);

-- Index for account-by-date sums (computed balance) and statements
CREATE INDEX idx_ledger_lines_acct_date ON ledger_lines(account_no, tran_date);

-- GL movements, append-only; balance_after snapshots the GL after each leg
CREATE TABLE gl_movements (
    id BIGSERIAL PRIMARY KEY,
    tran_id VARCHAR(30) NOT NULL REFERENCES ledger_lines(tran_id),
    gl_num VARCHAR(9) NOT NULL REFERENCES gl_setup(gl_num),
    dr_cr_flag CHAR(1) NOT NULL CHECK (dr_cr_flag IN ('D', 'C')),
    tran_date DATE NOT NULL,
    value_date DATE NOT NULL,
    amount NUMERIC(20, 2) NOT NULL,
    balance_after NUMERIC(20, 2) NOT NULL
);

CREATE INDEX idx_gl_movements_gl_date ON gl_movements(gl_num, tran_date);

-- Interest accrual transactions
CREATE TABLE accrual_trans (
    accr_id BIGSERIAL PRIMARY KEY,
    tran_id VARCHAR(30) NOT NULL,
    account_no VARCHAR(13) NOT NULL REFERENCES accounts(account_no),
    accrual_date DATE NOT NULL,
    interest_rate NUMERIC(10, 4) NOT NULL,
    amount NUMERIC(20, 2) NOT NULL,
    status CHAR(1) NOT NULL CHECK (status IN ('N', 'P', 'V'))
);

CREATE INDEX idx_accrual_trans_acct_date ON accrual_trans(account_no, accrual_date);

-- GL legs of each accrual (expense debit, payable credit)
CREATE TABLE accrual_gl_movements (
    id BIGSERIAL PRIMARY KEY,
    accr_id BIGINT NOT NULL REFERENCES accrual_trans(accr_id),
    gl_num VARCHAR(9) NOT NULL REFERENCES gl_setup(gl_num),
    dr_cr_flag CHAR(1) NOT NULL CHECK (dr_cr_flag IN ('D', 'C')),
    accrual_date DATE NOT NULL,
    amount NUMERIC(20, 2) NOT NULL,
    status CHAR(1) NOT NULL CHECK (status IN ('N', 'P', 'V'))
);

-- Denormalized per-account daily accrual record
CREATE TABLE account_accruals (
    id BIGSERIAL PRIMARY KEY,
    account_no VARCHAR(13) NOT NULL REFERENCES accounts(account_no),
    accrual_date DATE NOT NULL,
    interest_amount NUMERIC(20, 2) NOT NULL
);

CREATE INDEX idx_account_accruals_acct_date ON account_accruals(account_no, accrual_date);

-- Per-scope sequence counters for account-number allocation
CREATE TABLE account_sequences (
    scope_key VARCHAR(30) PRIMARY KEY,
    seq_number INTEGER NOT NULL DEFAULT 0,
    last_updated TIMESTAMPTZ NOT NULL DEFAULT now()
);
";
