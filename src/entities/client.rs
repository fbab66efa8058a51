//! Client entity - A customer that orders are sold to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the client
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Client name
    pub name: String,
    /// Free-text contact details (phone, e-mail, handle)
    pub contact: String,
}

/// Projects keep a loose `client_id`; no foreign key is declared so that deleting
/// a client never blocks on its orders.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
