//! Filament entity - A spool of printing material held in inventory.
//!
//! A spool has a total weight and a purchase price; pricing apportions that price per
//! gram consumed. `remaining_weight` is informational and is never decremented by
//! project consumption.

use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};

/// Material a filament spool is made of
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Material {
    /// Polylactic acid
    #[sea_orm(string_value = "PLA")]
    #[serde(rename = "PLA")]
    Pla,
    /// Polyethylene terephthalate glycol
    #[sea_orm(string_value = "PETG")]
    #[serde(rename = "PETG")]
    Petg,
    /// Acrylonitrile butadiene styrene
    #[sea_orm(string_value = "ABS")]
    #[serde(rename = "ABS")]
    Abs,
    /// Thermoplastic polyurethane (flexible)
    #[sea_orm(string_value = "TPU")]
    #[serde(rename = "TPU")]
    Tpu,
    /// Photopolymer resin
    #[sea_orm(string_value = "Resina")]
    #[serde(rename = "Resina")]
    Resin,
    /// Anything else
    #[sea_orm(string_value = "Otro")]
    #[serde(rename = "Otro")]
    Other,
}

/// Filament database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "filaments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the spool
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g. "Galaxy Black")
    pub name: String,
    /// Manufacturer
    pub brand: String,
    /// Material type
    pub material: Material,
    /// Total weight of a full spool in grams, always > 0
    pub weight_grams: f64,
    /// Cost of one full spool
    pub price: f64,
    /// Free-text color
    pub color: String,
    /// Grams left on the spool, between 0 and `weight_grams`
    pub remaining_weight: f64,
}

/// Filaments are referenced from projects by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
