//! Accessory inventory operations.

use crate::{
    core::validate,
    entities::{Accessory, accessory},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fields of an accessory as entered on the inventory form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccessory {
    /// Display name
    pub name: String,
    /// Cost per unit
    pub cost: f64,
}

impl From<accessory::Model> for NewAccessory {
    fn from(model: accessory::Model) -> Self {
        Self {
            name: model.name,
            cost: model.cost,
        }
    }
}

impl NewAccessory {
    /// Checks the unit cost and returns the trimmed name.
    ///
    /// # Errors
    /// Returns a validation error for a blank name or a negative cost.
    pub fn validate(&self) -> Result<String> {
        let name = validate::name("name", &self.name)?;
        validate::non_negative("cost", self.cost)?;
        Ok(name)
    }
}

/// Retrieves every accessory, ordered alphabetically by name.
pub async fn get_all_accessories(db: &DatabaseConnection) -> Result<Vec<accessory::Model>> {
    Accessory::find()
        .order_by_asc(accessory::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific accessory by its unique ID.
pub async fn get_accessory_by_id<C>(db: &C, accessory_id: i64) -> Result<Option<accessory::Model>>
where
    C: ConnectionTrait,
{
    Accessory::find_by_id(accessory_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new accessory after validating it.
pub async fn create_accessory<C>(db: &C, new: NewAccessory) -> Result<accessory::Model>
where
    C: ConnectionTrait,
{
    let name = new.validate()?;

    let accessory = accessory::ActiveModel {
        name: Set(name),
        cost: Set(new.cost),
        ..Default::default()
    };
    let created = accessory.insert(db).await?;
    info!("Created accessory {} ({})", created.id, created.name);
    Ok(created)
}

/// Replaces the name and cost of an existing accessory.
pub async fn update_accessory(
    db: &DatabaseConnection,
    accessory_id: i64,
    changes: NewAccessory,
) -> Result<accessory::Model> {
    let name = changes.validate()?;

    let mut accessory: accessory::ActiveModel = Accessory::find_by_id(accessory_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "accessory",
            id: accessory_id,
        })?
        .into();

    accessory.name = Set(name);
    accessory.cost = Set(changes.cost);

    accessory.update(db).await.map_err(Into::into)
}

/// Permanently deletes an accessory row.
pub async fn delete_accessory<C>(db: &C, accessory_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Accessory::delete_by_id(accessory_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "accessory",
            id: accessory_id,
        });
    }
    Ok(())
}
