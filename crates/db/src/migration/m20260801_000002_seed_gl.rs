//! Seeds the GL numbers the accrual engine posts against.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SEED_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DELETE FROM gl_balances WHERE gl_num IN ('610101001', '260101001');
             DELETE FROM gl_setup WHERE gl_num IN ('610101001', '260101001');",
        )
        .await?;
        Ok(())
    }
}

const SEED_SQL: &str = r"
-- Interest expense and interest payable GLs with their balance rows
INSERT INTO gl_setup (gl_num, gl_name, layer_id, parent_gl_num) VALUES
    ('610101001', 'Interest Expense - Deposits', 9, NULL),
    ('260101001', 'Interest Payable - Deposits', 9, NULL)
ON CONFLICT (gl_num) DO NOTHING;

INSERT INTO gl_balances (gl_num, current_balance) VALUES
    ('610101001', 0),
    ('260101001', 0)
ON CONFLICT (gl_num) DO NOTHING;
";
