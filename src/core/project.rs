//! Project operations - catalog designs and orders share one table.
//!
//! Status changes other than a full form save belong to
//! [`crate::core::lifecycle`]; this module only creates, edits, lists and deletes
//! rows.

use crate::{
    core::{lifecycle::ProjectStage, validate},
    entities::{Project, project},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fields of a project as entered on the calculator form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    /// Display name
    pub name: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Client the project is sold to; `None` for a catalog design
    #[serde(default)]
    pub client_id: Option<i64>,
    /// Manual price override
    #[serde(default)]
    pub manual_price: Option<f64>,
    /// Order status
    pub status: project::ProjectStatus,
    /// Filament bill of materials
    #[serde(default)]
    pub filaments: project::FilamentUsages,
    /// Accessory bill of materials
    #[serde(default)]
    pub accessories: project::AccessoryUsages,
    /// Machine time in hours
    pub printing_hours: f64,
    /// Post-processing labor cost
    #[serde(default)]
    pub post_processing_cost: f64,
    /// Risk multiplier, `None` means 1
    #[serde(default)]
    pub complexity_multiplier: Option<f64>,
    /// Profit margin percent, `None` means the global default
    #[serde(default)]
    pub profit_margin: Option<f64>,
}

impl From<project::Model> for NewProject {
    fn from(model: project::Model) -> Self {
        Self {
            name: model.name,
            description: model.description,
            client_id: model.client_id,
            manual_price: model.manual_price,
            status: model.status,
            filaments: model.filaments,
            accessories: model.accessories,
            printing_hours: model.printing_hours,
            post_processing_cost: model.post_processing_cost,
            complexity_multiplier: model.complexity_multiplier,
            profit_margin: model.profit_margin,
        }
    }
}

impl NewProject {
    /// Checks the scalar cost inputs and returns the trimmed name.
    ///
    /// Bill-of-materials entries are not checked.
    ///
    /// # Errors
    /// Returns a validation error for a blank name, negative hours, labor,
    /// multiplier or manual price, or a non-finite margin.
    pub fn validate(&self) -> Result<String> {
        let name = validate::name("name", &self.name)?;
        validate::non_negative("printing_hours", self.printing_hours)?;
        validate::non_negative("post_processing_cost", self.post_processing_cost)?;
        if let Some(multiplier) = self.complexity_multiplier {
            validate::non_negative("complexity_multiplier", multiplier)?;
        }
        if let Some(margin) = self.profit_margin {
            validate::finite("profit_margin", margin)?;
        }
        if let Some(price) = self.manual_price {
            validate::non_negative("manual_price", price)?;
        }
        Ok(name)
    }

    fn into_active_model(self, name: String) -> project::ActiveModel {
        project::ActiveModel {
            name: Set(name),
            description: Set(self.description),
            client_id: Set(self.client_id),
            manual_price: Set(self.manual_price),
            status: Set(self.status),
            filaments: Set(self.filaments),
            accessories: Set(self.accessories),
            printing_hours: Set(self.printing_hours),
            post_processing_cost: Set(self.post_processing_cost),
            complexity_multiplier: Set(self.complexity_multiplier),
            profit_margin: Set(self.profit_margin),
            ..Default::default()
        }
    }
}

/// Retrieves every project, newest first.
pub async fn get_all_projects(db: &DatabaseConnection) -> Result<Vec<project::Model>> {
    Project::find()
        .order_by_desc(project::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific project by its unique ID.
pub async fn get_project_by_id<C>(db: &C, project_id: i64) -> Result<Option<project::Model>>
where
    C: ConnectionTrait,
{
    Project::find_by_id(project_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a project stamped with the current time.
pub async fn create_project<C>(db: &C, new: NewProject) -> Result<project::Model>
where
    C: ConnectionTrait,
{
    insert_project(db, new, Utc::now()).await
}

/// Creates a project with an explicit creation time.
///
/// # Errors
/// Returns an error if validation or the insert fails.
pub async fn insert_project<C>(
    db: &C,
    new: NewProject,
    created_at: DateTime<Utc>,
) -> Result<project::Model>
where
    C: ConnectionTrait,
{
    let name = new.validate()?;

    let mut project = new.into_active_model(name);
    project.created_at = Set(created_at);

    let created = project.insert(db).await?;
    info!(
        "Created project {} ({}), client {:?}",
        created.id, created.name, created.client_id
    );
    Ok(created)
}

/// Saves an edited project, keeping its id, creation time and lifecycle stage.
///
/// The client and status always come from the stored row: only
/// [`crate::core::lifecycle`] moves a project between stages.
///
/// # Errors
/// Returns [`Error::NotFound`] for an unknown id and [`Error::InvalidTransition`]
/// for a delivered order, which can no longer be edited.
pub async fn update_project(
    db: &DatabaseConnection,
    project_id: i64,
    changes: NewProject,
) -> Result<project::Model> {
    let name = changes.validate()?;

    let existing = get_project_by_id(db, project_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "project",
            id: project_id,
        })?;

    let stage = ProjectStage::of(&existing);
    if stage.is_terminal() {
        return Err(Error::InvalidTransition {
            action: "edit",
            stage: stage.to_string(),
        });
    }

    let mut project = NewProject {
        client_id: existing.client_id,
        status: existing.status,
        ..changes
    }
    .into_active_model(name);
    project.id = sea_orm::ActiveValue::Unchanged(project_id);

    project.update(db).await.map_err(Into::into)
}

/// Permanently deletes a project row.
pub async fn delete_project<C>(db: &C, project_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Project::delete_by_id(project_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "project",
            id: project_id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::project::{AccessoryUsage, FilamentUsage, ProjectStatus};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_project_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut input = new_project("Maceta");
        input.printing_hours = -1.0;
        assert!(matches!(
            create_project(&db, input).await.unwrap_err(),
            Error::Validation {
                field: "printing_hours",
                ..
            }
        ));

        let mut input = new_project("Maceta");
        input.complexity_multiplier = Some(-0.5);
        assert!(create_project(&db, input).await.is_err());

        let mut input = new_project("Maceta");
        input.profit_margin = Some(f64::NAN);
        assert!(create_project(&db, input).await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_project_bill_of_materials_persists() -> Result<()> {
        let db = setup_test_db().await?;

        let mut input = new_project("Lampara luna");
        input.filaments = project::FilamentUsages(vec![
            FilamentUsage {
                filament_id: 7,
                grams_used: 320.5,
            },
            FilamentUsage {
                filament_id: 3,
                grams_used: 12.0,
            },
        ]);
        input.accessories = project::AccessoryUsages(vec![AccessoryUsage {
            accessory_id: 2,
            quantity: 4.0,
        }]);
        input.profit_margin = Some(0.0);

        let created = create_project(&db, input.clone()).await?;
        let fetched = get_project_by_id(&db, created.id).await?.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(NewProject::from(fetched), input);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_project_keeps_created_at() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Llavero").await?;

        let mut changes = NewProject::from(project.clone());
        changes.printing_hours = 4.5;
        changes.manual_price = Some(2500.0);
        let updated = update_project(&db, project.id, changes).await?;

        assert_eq!(updated.id, project.id);
        assert_eq!(updated.printing_hours, 4.5);
        assert_eq!(updated.manual_price, Some(2500.0));
        assert_eq!(updated.created_at, project.created_at);
        assert_eq!(updated.status, ProjectStatus::Pending);

        assert!(matches!(
            update_project(&db, 404, new_project("X")).await.unwrap_err(),
            Error::NotFound {
                entity: "project",
                id: 404
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_projects_listed_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        let older = insert_project(&db, new_project("A"), now - chrono::Duration::hours(2)).await?;
        let newer = insert_project(&db, new_project("B"), now).await?;

        let all = get_all_projects(&db).await?;
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);

        delete_project(&db, older.id).await?;
        assert_eq!(get_all_projects(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_project_keeps_stage() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Julia").await?;
        let design = create_test_project(&db, "Jarron").await?;

        // A design cannot be turned into a delivered order through the form
        let mut changes = NewProject::from(design.clone());
        changes.status = ProjectStatus::Delivered;
        changes.client_id = Some(client.id);
        changes.printing_hours = 3.0;
        let updated = update_project(&db, design.id, changes).await?;
        assert_eq!(updated.client_id, None);
        assert_eq!(updated.status, ProjectStatus::Pending);
        assert_eq!(updated.printing_hours, 3.0);

        // Nor can a pending order lose its client
        let order = crate::core::lifecycle::sell_project(&db, design.id, client.id).await?;
        let mut changes = NewProject::from(order.clone());
        changes.client_id = None;
        let updated = update_project(&db, order.id, changes).await?;
        assert_eq!(updated.client_id, Some(client.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_delivered_order_cannot_be_edited() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Bruno").await?;
        let design = create_test_project(&db, "Reloj").await?;
        let order = crate::core::lifecycle::sell_project(&db, design.id, client.id).await?;
        let delivered = crate::core::lifecycle::deliver_project(&db, order.id).await?;

        let mut changes = NewProject::from(delivered.clone());
        changes.status = ProjectStatus::Pending;
        assert!(matches!(
            update_project(&db, order.id, changes).await.unwrap_err(),
            Error::InvalidTransition { action: "edit", .. }
        ));

        let reloaded = get_project_by_id(&db, order.id).await?.unwrap();
        assert_eq!(reloaded, delivered);

        Ok(())
    }
}
