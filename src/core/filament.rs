//! Filament inventory operations.
//!
//! Creating and updating a spool validates its numbers up front: a spool weight of
//! zero would make the per-gram cost non-finite, so it never reaches storage.
//! Deletion here is a hard delete; archiving goes through [`crate::core::trash`].

use crate::{
    core::validate,
    entities::{Filament, filament},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fields of a filament spool as entered on the inventory form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFilament {
    /// Display name
    pub name: String,
    /// Manufacturer
    pub brand: String,
    /// Material type
    pub material: filament::Material,
    /// Total spool weight in grams
    pub weight_grams: f64,
    /// Cost of a full spool
    pub price: f64,
    /// Free-text color
    pub color: String,
    /// Grams left on the spool
    pub remaining_weight: f64,
}

impl From<filament::Model> for NewFilament {
    fn from(model: filament::Model) -> Self {
        Self {
            name: model.name,
            brand: model.brand,
            material: model.material,
            weight_grams: model.weight_grams,
            price: model.price,
            color: model.color,
            remaining_weight: model.remaining_weight,
        }
    }
}

impl NewFilament {
    /// Checks the spool numbers and returns the trimmed name.
    ///
    /// # Errors
    /// Returns a validation error if the name is blank, the weight is not positive,
    /// the price is negative, or the remaining weight is outside `0..=weight_grams`.
    pub fn validate(&self) -> Result<String> {
        let name = validate::name("name", &self.name)?;
        validate::positive("weight_grams", self.weight_grams)?;
        validate::non_negative("price", self.price)?;
        validate::non_negative("remaining_weight", self.remaining_weight)?;
        if self.remaining_weight > self.weight_grams {
            return Err(Error::validation(
                "remaining_weight",
                format!(
                    "{} exceeds the spool weight of {}",
                    self.remaining_weight, self.weight_grams
                ),
            ));
        }
        Ok(name)
    }
}

/// Retrieves every filament, ordered alphabetically by name.
pub async fn get_all_filaments(db: &DatabaseConnection) -> Result<Vec<filament::Model>> {
    Filament::find()
        .order_by_asc(filament::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific filament by its unique ID.
pub async fn get_filament_by_id<C>(db: &C, filament_id: i64) -> Result<Option<filament::Model>>
where
    C: ConnectionTrait,
{
    Filament::find_by_id(filament_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new filament spool after validating it.
///
/// # Errors
/// Returns an error if validation fails or the insert fails.
pub async fn create_filament<C>(db: &C, new: NewFilament) -> Result<filament::Model>
where
    C: ConnectionTrait,
{
    let name = new.validate()?;

    let filament = filament::ActiveModel {
        name: Set(name),
        brand: Set(new.brand.trim().to_string()),
        material: Set(new.material),
        weight_grams: Set(new.weight_grams),
        price: Set(new.price),
        color: Set(new.color.trim().to_string()),
        remaining_weight: Set(new.remaining_weight),
        ..Default::default()
    };
    let created = filament.insert(db).await?;
    info!("Created filament {} ({})", created.id, created.name);
    Ok(created)
}

/// Replaces every editable field of an existing filament.
///
/// # Errors
/// Returns an error if validation fails, the filament does not exist, or the
/// update fails.
pub async fn update_filament(
    db: &DatabaseConnection,
    filament_id: i64,
    changes: NewFilament,
) -> Result<filament::Model> {
    let name = changes.validate()?;

    let mut filament: filament::ActiveModel = Filament::find_by_id(filament_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "filament",
            id: filament_id,
        })?
        .into();

    filament.name = Set(name);
    filament.brand = Set(changes.brand.trim().to_string());
    filament.material = Set(changes.material);
    filament.weight_grams = Set(changes.weight_grams);
    filament.price = Set(changes.price);
    filament.color = Set(changes.color.trim().to_string());
    filament.remaining_weight = Set(changes.remaining_weight);

    filament.update(db).await.map_err(Into::into)
}

/// Permanently deletes a filament row.
///
/// # Errors
/// Returns [`Error::NotFound`] if no row was deleted.
pub async fn delete_filament<C>(db: &C, filament_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Filament::delete_by_id(filament_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "filament",
            id: filament_id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_filament_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut input = new_filament("PLA Negro", 10000.0, 1000.0);
        input.weight_grams = 0.0;
        let result = create_filament(&db, input).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation {
                field: "weight_grams",
                ..
            }
        ));

        let mut input = new_filament("PLA Negro", 10000.0, 1000.0);
        input.weight_grams = -250.0;
        assert!(create_filament(&db, input).await.is_err());

        let mut input = new_filament("PLA Negro", 10000.0, 1000.0);
        input.remaining_weight = 1200.0;
        assert!(matches!(
            create_filament(&db, input).await.unwrap_err(),
            Error::Validation {
                field: "remaining_weight",
                ..
            }
        ));

        let input = new_filament("   ", 10000.0, 1000.0);
        assert!(matches!(
            create_filament(&db, input).await.unwrap_err(),
            Error::Validation { field: "name", .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_list_filaments_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let petg = create_filament(&db, new_filament("PETG Azul", 12000.0, 1000.0)).await?;
        let pla = create_filament(&db, new_filament("  ABS Rojo ", 9000.0, 750.0)).await?;

        assert_eq!(pla.name, "ABS Rojo");
        assert_eq!(pla.weight_grams, 750.0);

        let all = get_all_filaments(&db).await?;
        assert_eq!(all.len(), 2);
        // Alphabetical by name
        assert_eq!(all[0].id, pla.id);
        assert_eq!(all[1].id, petg.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_filament_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let filament = create_test_filament(&db, "PLA Blanco").await?;

        let mut changes = NewFilament::from(filament.clone());
        changes.remaining_weight = 320.0;
        changes.price = 11000.0;
        let updated = update_filament(&db, filament.id, changes).await?;

        assert_eq!(updated.id, filament.id);
        assert_eq!(updated.remaining_weight, 320.0);
        assert_eq!(updated.price, 11000.0);

        let missing = update_filament(&db, 999, new_filament("X", 1.0, 1.0)).await;
        assert!(matches!(
            missing.unwrap_err(),
            Error::NotFound {
                entity: "filament",
                id: 999
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_filament_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let filament = create_test_filament(&db, "PLA Blanco").await?;

        delete_filament(&db, filament.id).await?;
        assert!(get_filament_by_id(&db, filament.id).await?.is_none());

        let again = delete_filament(&db, filament.id).await;
        assert!(matches!(again.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }
}
