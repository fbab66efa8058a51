//! Global configuration entity - The singleton row holding pricing parameters.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Primary key of the only configuration row
pub const SINGLETON_ID: i32 = 1;

/// Global configuration database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "config")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Always [`SINGLETON_ID`]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Electricity price per kWh
    pub energy_rate_kwh: f64,
    /// Printer power draw in watts
    pub printer_power_watts: f64,
    /// Profit margin in percent used when a project has none
    pub default_profit_margin: f64,
    /// Display symbol of the currency
    pub currency: String,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            id: SINGLETON_ID,
            energy_rate_kwh: 150.0,
            printer_power_watts: 200.0,
            default_profit_margin: 100.0,
            currency: "$".to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
