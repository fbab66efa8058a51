//! The workshop application container.
//!
//! [`Workshop`] owns the database connection, the snapshot store, the notifier
//! and the current [`CatalogStore`]. Every user action goes through it: the
//! action runs, a failure is reported to the user, and on success the store is
//! pulled again from scratch.

use crate::{
    core::{
        accessory::{NewAccessory, create_accessory, update_accessory},
        catalog::CatalogStore,
        client::{NewClient, create_client, delete_client},
        filament::{NewFilament, create_filament, update_filament},
        global_config::upsert_config,
        lifecycle::{deliver_project, sell_project},
        project::{NewProject, create_project, update_project},
        purchase::{NewPurchase, create_purchase, update_purchase},
        snapshot::SnapshotStore,
        trash::{self, TrashItem},
    },
    entities::{accessory, client, deleted_record, filament, global_config, project, purchase},
    errors::{Error, Result},
    notify::Notifier,
};
use sea_orm::DatabaseConnection;
use tracing::{debug, error};

/// Result of a user action
#[derive(Debug)]
pub enum ActionOutcome<T> {
    /// The action completed and the store was refreshed
    Done(T),
    /// The user declined the confirmation; nothing changed
    Cancelled,
    /// The action failed and the user was alerted; nothing changed
    Failed(Error),
}

impl<T> ActionOutcome<T> {
    /// Whether the action completed
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// The value of a completed action
    #[must_use]
    pub fn done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::Cancelled | Self::Failed(_) => None,
        }
    }
}

/// The running workshop: storage, side channel, user channel and current data
pub struct Workshop<S, N> {
    db: DatabaseConnection,
    snapshots: S,
    notifier: N,
    catalog: CatalogStore,
}

impl<S, N> Workshop<S, N>
where
    S: SnapshotStore,
    N: Notifier,
{
    /// Opens the workshop and performs the initial load.
    pub async fn open(db: DatabaseConnection, snapshots: S, notifier: N) -> Self {
        let catalog = CatalogStore::load(&db, &snapshots).await;
        Self {
            db,
            snapshots,
            notifier,
            catalog,
        }
    }

    /// Data as of the last refresh
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The underlying connection
    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// The notifier actions report to
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Replaces the store with a fresh load.
    pub async fn refresh(&mut self) {
        self.catalog = CatalogStore::load(&self.db, &self.snapshots).await;
        debug!("Catalog refreshed");
    }

    async fn settle<T>(&mut self, action: &str, result: Result<T>) -> ActionOutcome<T> {
        match result {
            Ok(value) => {
                self.refresh().await;
                ActionOutcome::Done(value)
            }
            Err(e) => {
                error!("Failed to {action}: {e}");
                self.notifier
                    .alert("Error", &format!("Could not {action}. Please try again."));
                ActionOutcome::Failed(e)
            }
        }
    }

    /// Saves a new spool, or the edits to spool `id`.
    pub async fn save_filament(
        &mut self,
        id: Option<i64>,
        input: NewFilament,
    ) -> ActionOutcome<filament::Model> {
        let result = match id {
            Some(id) => update_filament(&self.db, id, input).await,
            None => create_filament(&self.db, input).await,
        };
        self.settle("save the filament", result).await
    }

    /// Saves a new accessory, or the edits to accessory `id`.
    pub async fn save_accessory(
        &mut self,
        id: Option<i64>,
        input: NewAccessory,
    ) -> ActionOutcome<accessory::Model> {
        let result = match id {
            Some(id) => update_accessory(&self.db, id, input).await,
            None => create_accessory(&self.db, input).await,
        };
        self.settle("save the accessory", result).await
    }

    /// Records a new expense, or the edits to purchase `id`.
    pub async fn save_purchase(
        &mut self,
        id: Option<i64>,
        input: NewPurchase,
    ) -> ActionOutcome<purchase::Model> {
        let result = match id {
            Some(id) => update_purchase(&self.db, id, input).await,
            None => create_purchase(&self.db, input).await,
        };
        self.settle("save the purchase", result).await
    }

    /// Saves the calculator form as a new project, or over project `id`.
    pub async fn save_project(
        &mut self,
        id: Option<i64>,
        input: NewProject,
    ) -> ActionOutcome<project::Model> {
        let result = match id {
            Some(id) => update_project(&self.db, id, input).await,
            None => create_project(&self.db, input).await,
        };
        self.settle("save the project", result).await
    }

    /// Adds a client.
    pub async fn add_client(&mut self, input: NewClient) -> ActionOutcome<client::Model> {
        let result = create_client(&self.db, input).await;
        self.settle("add the client", result).await
    }

    /// Permanently deletes a client after confirmation. Clients are not archived.
    pub async fn remove_client(&mut self, client_id: i64) -> ActionOutcome<()> {
        if !self.notifier.confirm("Delete client", "Delete this client?") {
            return ActionOutcome::Cancelled;
        }
        let result = delete_client(&self.db, client_id).await;
        self.settle("delete the client", result).await
    }

    /// Moves an item to the trash after confirmation.
    pub async fn delete_item(&mut self, item: &TrashItem) -> ActionOutcome<deleted_record::Model> {
        let title = format!("Delete {}", item.item_type());
        let message = format!("Are you sure you want to delete '{}'?", item.name());
        if !self.notifier.confirm(&title, &message) {
            return ActionOutcome::Cancelled;
        }

        let result =
            trash::soft_delete(&self.db, &self.snapshots, item, &self.catalog.pricing()).await;
        self.settle("delete the item", result).await
    }

    /// Restores an archived item and tells the user how it went.
    pub async fn restore(&mut self, record_id: i64) -> ActionOutcome<TrashItem> {
        match trash::restore(&self.db, &self.snapshots, record_id).await {
            Ok(item) => {
                self.notifier
                    .alert("Restored", &format!("'{}' is back in place.", item.name()));
                self.refresh().await;
                ActionOutcome::Done(item)
            }
            Err(e) => {
                self.notifier.alert(
                    "Restore failed",
                    "The item could not be restored. Its data may be corrupted.",
                );
                ActionOutcome::Failed(e)
            }
        }
    }

    /// Permanently removes an archived item after confirmation.
    pub async fn purge(&mut self, record_id: i64) -> ActionOutcome<()> {
        if !self
            .notifier
            .confirm("Empty from trash", "This cannot be undone. Continue?")
        {
            return ActionOutcome::Cancelled;
        }
        let result = trash::purge(&self.db, &self.snapshots, record_id).await;
        self.settle("purge the item", result).await
    }

    /// Sells a catalog design to a client as a new pending order.
    pub async fn sell(&mut self, design_id: i64, client_id: i64) -> ActionOutcome<project::Model> {
        let result = sell_project(&self.db, design_id, client_id).await;
        self.settle("sell the design", result).await
    }

    /// Marks a pending order as delivered after confirmation.
    pub async fn deliver(&mut self, order_id: i64) -> ActionOutcome<project::Model> {
        if !self
            .notifier
            .confirm("Complete sale", "Mark this piece as delivered?")
        {
            return ActionOutcome::Cancelled;
        }
        let result = deliver_project(&self.db, order_id).await;
        self.settle("deliver the order", result).await
    }

    /// Saves the pricing parameters.
    pub async fn save_config(
        &mut self,
        config: global_config::Model,
    ) -> ActionOutcome<global_config::Model> {
        let result = upsert_config(&self.db, &config).await;
        let outcome = self.settle("save the settings", result).await;
        if outcome.is_done() {
            self.notifier.alert("Settings saved", "Parameters updated.");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::snapshot::MemorySnapshotStore;
    use crate::entities::{ItemType, project::ProjectStatus};
    use crate::test_utils::*;

    async fn open_workshop(
        confirm: bool,
    ) -> Result<Workshop<MemorySnapshotStore, RecordingNotifier>> {
        let db = setup_test_db().await?;
        Ok(Workshop::open(db, MemorySnapshotStore::new(), RecordingNotifier::new(confirm)).await)
    }

    #[tokio::test]
    async fn test_sale_flow_updates_stats() -> Result<()> {
        let mut workshop = open_workshop(true).await?;

        let client = workshop
            .add_client(NewClient {
                name: "Carla".to_string(),
                contact: "carla@example.com".to_string(),
            })
            .await
            .done()
            .unwrap();
        let mut design = new_project("Lampara");
        design.manual_price = Some(9000.0);
        let design = workshop.save_project(None, design).await.done().unwrap();

        let order = workshop.sell(design.id, client.id).await.done().unwrap();
        assert_eq!(workshop.catalog().stats().active_orders, 1);
        assert_eq!(workshop.catalog().orders().count(), 1);
        assert_eq!(workshop.catalog().catalog_designs().count(), 1);

        let delivered = workshop.deliver(order.id).await.done().unwrap();
        assert_eq!(delivered.status, ProjectStatus::Delivered);

        let stats = workshop.catalog().stats();
        assert_eq!(stats.active_orders, 0);
        assert_eq!(stats.total_revenue, 9000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_declined_confirmation_changes_nothing() -> Result<()> {
        let mut workshop = open_workshop(false).await?;
        let spool = create_test_filament(workshop.db(), "PLA Rojo").await?;
        workshop.refresh().await;

        let outcome = workshop.delete_item(&TrashItem::Filament(spool)).await;
        assert!(matches!(outcome, ActionOutcome::Cancelled));
        assert_eq!(workshop.catalog().filaments.len(), 1);
        assert!(workshop.catalog().deleted.is_empty());
        assert_eq!(workshop.notifier().confirmations(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_and_restore_through_workshop() -> Result<()> {
        let mut workshop = open_workshop(true).await?;
        let item = create_test_accessory(workshop.db(), "Argolla", 120.0).await?;
        workshop.refresh().await;

        let record = workshop
            .delete_item(&TrashItem::Accessory(item))
            .await
            .done()
            .unwrap();
        assert!(workshop.catalog().accessories.is_empty());
        assert_eq!(workshop.catalog().deleted.len(), 1);
        assert_eq!(
            workshop.catalog().deleted[0].record.kind(),
            Some(ItemType::Accessory)
        );

        let restored = workshop.restore(record.id).await.done().unwrap();
        assert_eq!(restored.name(), "Argolla");
        assert_eq!(workshop.catalog().accessories.len(), 1);
        assert!(workshop.catalog().deleted.is_empty());
        assert_eq!(workshop.notifier().last_alert().unwrap().0, "Restored");

        Ok(())
    }

    #[tokio::test]
    async fn test_failures_are_reported() -> Result<()> {
        let mut workshop = open_workshop(true).await?;

        let outcome = workshop.deliver(12345).await;
        assert!(matches!(
            outcome,
            ActionOutcome::Failed(Error::NotFound { id: 12345, .. })
        ));
        assert_eq!(workshop.notifier().last_alert().unwrap().0, "Error");

        let outcome = workshop.restore(777).await;
        assert!(matches!(
            outcome,
            ActionOutcome::Failed(Error::RestoreFailed { id: 777, .. })
        ));
        assert_eq!(workshop.notifier().last_alert().unwrap().0, "Restore failed");

        Ok(())
    }

    #[tokio::test]
    async fn test_save_config_refreshes_pricing() -> Result<()> {
        let mut workshop = open_workshop(true).await?;

        let config = global_config::Model {
            energy_rate_kwh: 200.0,
            ..workshop.catalog().config.clone()
        };
        let saved = workshop
            .save_config(config)
            .await
            .done()
            .unwrap();
        assert_eq!(saved.energy_rate_kwh, 200.0);
        assert_eq!(workshop.catalog().config.energy_rate_kwh, 200.0);
        assert_eq!(
            workshop.notifier().last_alert().unwrap().0,
            "Settings saved"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_and_client_management() -> Result<()> {
        let mut workshop = open_workshop(true).await?;

        let expense = workshop
            .save_purchase(None, new_purchase("Rollo PLA", 15000.0))
            .await
            .done()
            .unwrap();
        let mut edit = new_purchase("Rollo PLA", 14000.0);
        edit.quantity = 2;
        workshop.save_purchase(Some(expense.id), edit).await.done().unwrap();
        assert_eq!(workshop.catalog().stats().investment, 14000.0);

        let client = create_test_client(workshop.db(), "Temporal").await?;
        workshop.refresh().await;
        assert!(workshop.remove_client(client.id).await.is_done());
        assert!(workshop.catalog().clients.is_empty());

        Ok(())
    }
}
