//! Project lifecycle: catalog design → pending order → delivered order.
//!
//! The stage is derived from the row, never stored: no client means catalog,
//! otherwise the status decides. Selling copies a catalog design into a brand new
//! order so one design can be sold any number of times. Delivery flips the status
//! in place. Delivered is terminal; deletion is always possible through
//! [`crate::core::trash`].

use crate::{
    core::{
        client::get_client_by_id,
        project::{NewProject, create_project, get_project_by_id},
    },
    entities::{Project, project},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use std::fmt;
use tracing::info;

/// Where a project stands in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectStage {
    /// Reusable design without a client
    Catalog,
    /// Sold, awaiting delivery
    Pending,
    /// Handed over to the client
    Delivered,
}

impl ProjectStage {
    /// Derives the stage of a project row
    #[must_use]
    pub const fn of(project: &project::Model) -> Self {
        match (project.client_id, project.status) {
            (None, _) => Self::Catalog,
            (Some(_), project::ProjectStatus::Pending) => Self::Pending,
            (Some(_), project::ProjectStatus::Delivered) => Self::Delivered,
        }
    }

    /// Whether no further status transition exists
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for ProjectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Catalog => "catalog",
            Self::Pending => "pending",
            Self::Delivered => "delivered",
        };
        f.write_str(name)
    }
}

/// Builds the order created by selling `design` to `client_id`.
///
/// Every field is copied except the id; the client is set and the status forced
/// to pending. The creation time is stamped when the order is inserted.
///
/// # Errors
/// Returns [`Error::InvalidTransition`] if `design` is not a catalog design.
pub fn sale_order(design: &project::Model, client_id: i64) -> Result<NewProject> {
    let stage = ProjectStage::of(design);
    if stage != ProjectStage::Catalog {
        return Err(Error::InvalidTransition {
            action: "sell",
            stage: stage.to_string(),
        });
    }

    let mut order = NewProject::from(design.clone());
    order.client_id = Some(client_id);
    order.status = project::ProjectStatus::Pending;
    Ok(order)
}

/// Checks that `project` may be delivered.
///
/// # Errors
/// Returns [`Error::InvalidTransition`] unless the project is a pending order.
pub fn ensure_deliverable(project: &project::Model) -> Result<()> {
    match ProjectStage::of(project) {
        ProjectStage::Pending => Ok(()),
        stage => Err(Error::InvalidTransition {
            action: "deliver",
            stage: stage.to_string(),
        }),
    }
}

/// Sells a catalog design to a client, creating a new pending order.
///
/// The design itself is left untouched.
///
/// # Errors
/// Returns an error if the design or the client does not exist, the project is
/// not a catalog design, or the insert fails.
pub async fn sell_project(
    db: &DatabaseConnection,
    design_id: i64,
    client_id: i64,
) -> Result<project::Model> {
    let design = get_project_by_id(db, design_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "project",
            id: design_id,
        })?;

    let order = sale_order(&design, client_id)?;

    get_client_by_id(db, client_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "client",
            id: client_id,
        })?;

    let created = create_project(db, order).await?;
    info!(
        "Sold design {} to client {client_id} as order {}",
        design.id, created.id
    );
    Ok(created)
}

/// Marks a pending order as delivered. Only the status changes.
///
/// # Errors
/// Returns an error if the project does not exist or is not a pending order.
pub async fn deliver_project(db: &DatabaseConnection, project_id: i64) -> Result<project::Model> {
    let project = Project::find_by_id(project_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "project",
            id: project_id,
        })?;

    ensure_deliverable(&project)?;

    let mut active: project::ActiveModel = project.into();
    active.status = Set(project::ProjectStatus::Delivered);
    let delivered = active.update(db).await?;

    info!("Order {} delivered", delivered.id);
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::project::ProjectStatus;
    use crate::test_utils::*;

    #[test]
    fn test_stage_of() {
        let mut project = project_model(1, None);
        assert_eq!(ProjectStage::of(&project), ProjectStage::Catalog);

        project.client_id = Some(4);
        assert_eq!(ProjectStage::of(&project), ProjectStage::Pending);

        project.status = ProjectStatus::Delivered;
        assert_eq!(ProjectStage::of(&project), ProjectStage::Delivered);
        assert!(ProjectStage::of(&project).is_terminal());
    }

    #[test]
    fn test_sale_order_copies_design() {
        let mut design = project_model(10, None);
        design.name = "Dragon articulado".to_string();
        design.printing_hours = 12.0;
        design.profit_margin = Some(80.0);

        let order = sale_order(&design, 3).unwrap();
        assert_eq!(order.client_id, Some(3));
        assert_eq!(order.status, ProjectStatus::Pending);
        assert_eq!(order.name, design.name);
        assert_eq!(order.printing_hours, 12.0_f64);
        assert_eq!(order.profit_margin, Some(80.0));
    }

    #[test]
    fn test_only_catalog_designs_can_be_sold() {
        let order = project_model(1, Some(2));
        assert!(matches!(
            sale_order(&order, 5),
            Err(Error::InvalidTransition { action: "sell", .. })
        ));
    }

    #[test]
    fn test_only_pending_orders_can_be_delivered() {
        let mut project = project_model(1, None);
        assert!(ensure_deliverable(&project).is_err());

        project.client_id = Some(1);
        assert!(ensure_deliverable(&project).is_ok());

        project.status = ProjectStatus::Delivered;
        assert!(matches!(
            ensure_deliverable(&project),
            Err(Error::InvalidTransition {
                action: "deliver",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_sell_leaves_design_intact() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Marta").await?;
        let design = create_test_project(&db, "Soporte auriculares").await?;

        let first = sell_project(&db, design.id, client.id).await?;
        let second = sell_project(&db, design.id, client.id).await?;

        assert_ne!(first.id, design.id);
        assert_ne!(first.id, second.id);
        assert_eq!(first.client_id, Some(client.id));
        assert_eq!(first.status, ProjectStatus::Pending);
        assert_eq!(first.name, design.name);
        assert_eq!(first.filaments, design.filaments);

        let reloaded = get_project_by_id(&db, design.id).await?.unwrap();
        assert_eq!(reloaded, design);

        Ok(())
    }

    #[tokio::test]
    async fn test_sell_requires_existing_client() -> Result<()> {
        let db = setup_test_db().await?;
        let design = create_test_project(&db, "Porta lapices").await?;

        let result = sell_project(&db, design.id, 99).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "client",
                id: 99
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_deliver_project_flow() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Luis").await?;
        let design = create_test_project(&db, "Mate impreso").await?;
        let order = sell_project(&db, design.id, client.id).await?;

        let delivered = deliver_project(&db, order.id).await?;
        assert_eq!(delivered.status, ProjectStatus::Delivered);
        assert_eq!(delivered.printing_hours, order.printing_hours);
        assert_eq!(delivered.created_at, order.created_at);

        // Delivered is terminal
        assert!(matches!(
            deliver_project(&db, order.id).await.unwrap_err(),
            Error::InvalidTransition { .. }
        ));
        // Catalog designs cannot be delivered
        assert!(deliver_project(&db, design.id).await.is_err());

        Ok(())
    }
}
