//! Accessory entity - Non-filament parts consumed by a project (magnets, hooks, bases).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Accessory database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accessories")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the accessory
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Cost per unit
    pub cost: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
