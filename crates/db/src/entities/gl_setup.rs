//! `SeaORM` Entity for the GL chart-of-accounts table (consumed, not owned).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "gl_setup")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub gl_num: String,
    pub gl_name: String,
    pub layer_id: i32,
    pub parent_gl_num: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
