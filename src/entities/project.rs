//! Project entity - A printable design and, once a client is attached, an order.
//!
//! A project without `client_id` is a catalog design. With a client it is an order
//! that moves from `pending` to `delivered`. The bill of materials is stored as two
//! JSON columns holding ordered lists of usages.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};

/// Order status. Catalog designs carry `Pending` but have no client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Awaiting production or hand-over
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Handed over to the client, terminal
    #[sea_orm(string_value = "delivered")]
    Delivered,
}

/// Grams of one filament consumed by a project
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilamentUsage {
    /// Referenced filament; may point at a filament that no longer exists
    pub filament_id: i64,
    /// Grams consumed
    pub grams_used: f64,
}

/// Units of one accessory consumed by a project
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryUsage {
    /// Referenced accessory; may point at an accessory that no longer exists
    pub accessory_id: i64,
    /// Units consumed
    pub quantity: f64,
}

/// Ordered filament bill of materials
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct FilamentUsages(pub Vec<FilamentUsage>);

/// Ordered accessory bill of materials
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct AccessoryUsages(pub Vec<AccessoryUsage>);

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the project
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Client the project was sold to; `None` for catalog designs
    pub client_id: Option<i64>,
    /// Price agreed by hand, overriding the computed one
    pub manual_price: Option<f64>,
    /// Order status
    pub status: ProjectStatus,
    /// Filament bill of materials
    #[sea_orm(column_type = "Json")]
    #[serde(default)]
    pub filaments: FilamentUsages,
    /// Accessory bill of materials
    #[sea_orm(column_type = "Json")]
    #[serde(default)]
    pub accessories: AccessoryUsages,
    /// Machine time in hours
    pub printing_hours: f64,
    /// Post-processing labor cost
    #[serde(default)]
    pub post_processing_cost: f64,
    /// Risk multiplier applied to the base production cost; `None` means 1
    pub complexity_multiplier: Option<f64>,
    /// Profit margin in percent; `None` falls back to the global default
    pub profit_margin: Option<f64>,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
