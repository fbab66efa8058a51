//! Deleted record entity - The trash archive.
//!
//! One row per soft-deleted item. The full JSON snapshot needed to rebuild the item
//! is not a column; it lives in the snapshot side channel keyed by this row's id
//! (see [`crate::core::snapshot`]).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tag describing what kind of item was archived.
///
/// Stored as its Spanish display tag, which is also what the trash view shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// A filament spool
    #[serde(rename = "filamento")]
    Filament,
    /// An accessory
    #[serde(rename = "accesorio")]
    Accessory,
    /// A catalog design (project without client)
    #[serde(rename = "diseño")]
    Design,
    /// An order (project with client)
    #[serde(rename = "pedido")]
    Order,
    /// A recorded expense
    #[serde(rename = "inversión")]
    Purchase,
}

impl ItemType {
    /// Every tag, in display order
    pub const ALL: [Self; 5] = [
        Self::Filament,
        Self::Accessory,
        Self::Design,
        Self::Order,
        Self::Purchase,
    ];

    /// The stored tag string
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Filament => "filamento",
            Self::Accessory => "accesorio",
            Self::Design => "diseño",
            Self::Order => "pedido",
            Self::Purchase => "inversión",
        }
    }

    /// Parses a stored tag, returning `None` for unknown tags
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_tag() == tag)
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Deleted record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deleted_records")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, also the key of the snapshot side channel
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tag of the archived item, one of [`ItemType::as_tag`]
    pub item_type: String,
    /// Display label of the archived item
    pub item_name: String,
    /// When the item was deleted
    pub deleted_at: DateTimeUtc,
    /// Price of a project at deletion time
    pub original_price: Option<f64>,
    /// Profit of a project at deletion time
    pub original_profit: Option<f64>,
    /// Whether the project had been delivered when it was deleted
    pub was_sold: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Model {
    /// Parsed item tag, `None` if the stored tag is unknown
    #[must_use]
    pub fn kind(&self) -> Option<ItemType> {
        ItemType::from_tag(&self.item_type)
    }
}

impl ActiveModelBehavior for ActiveModel {}
