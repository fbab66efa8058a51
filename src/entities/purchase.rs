//! Purchase entity - A recorded expense.
//!
//! Purchases are not reconciled against filament or accessory stock; they only feed
//! the investment figure of the dashboard statistics.

use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};

/// What an expense was spent on
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PurchaseKind {
    /// Filament spools
    #[sea_orm(string_value = "filament")]
    Filament,
    /// Accessories and supplies
    #[sea_orm(string_value = "accessory")]
    Accessory,
}

/// Purchase database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the purchase
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Expense category
    #[serde(rename = "type")]
    pub kind: PurchaseKind,
    /// What was bought
    pub name: String,
    /// Total amount paid, >= 0
    pub amount: f64,
    /// Number of units bought
    pub quantity: i64,
    /// When the expense was recorded
    pub date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
