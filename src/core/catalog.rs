//! In-memory snapshot of everything the workshop has stored.
//!
//! The store is pulled in one go with [`CatalogStore::load`] and replaced
//! wholesale after every mutation. Derived figures (prices, dashboard stats) are
//! computed from it on demand.

use crate::{
    core::{
        accessory::get_all_accessories,
        client::get_all_clients,
        filament::get_all_filaments,
        global_config::get_config,
        pricing::{CalculationResult, PricingContext},
        project::get_all_projects,
        purchase::get_all_purchases,
        snapshot::SnapshotStore,
        stats::{DashboardStats, compute_stats},
        trash::{ArchivedItem, list_deleted},
    },
    entities::{accessory, client, filament, global_config, project, purchase},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

/// Every record collection plus the pricing configuration
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    /// Filament spools, by name
    pub filaments: Vec<filament::Model>,
    /// Accessories, by name
    pub accessories: Vec<accessory::Model>,
    /// Clients, by name
    pub clients: Vec<client::Model>,
    /// Purchases, newest first
    pub purchases: Vec<purchase::Model>,
    /// Designs and orders, newest first
    pub projects: Vec<project::Model>,
    /// Pricing parameters
    pub config: global_config::Model,
    /// Trash contents, newest first
    pub deleted: Vec<ArchivedItem>,
}

impl CatalogStore {
    /// Fetches all seven collections concurrently.
    ///
    /// A fetch that fails is logged and leaves its collection empty, or the
    /// configuration at its defaults, so a missing table never blocks startup.
    pub async fn load<S>(db: &DatabaseConnection, snapshots: &S) -> Self
    where
        S: SnapshotStore + ?Sized,
    {
        let (filaments, accessories, clients, purchases, projects, config, deleted) = tokio::join!(
            get_all_filaments(db),
            get_all_accessories(db),
            get_all_clients(db),
            get_all_purchases(db),
            get_all_projects(db),
            get_config(db),
            list_deleted(db, snapshots),
        );

        let config = match config {
            Ok(Some(config)) => config,
            Ok(None) => {
                warn!("No global configuration stored, using defaults");
                global_config::Model::default()
            }
            Err(e) => {
                warn!("Failed to load global configuration, using defaults: {e}");
                global_config::Model::default()
            }
        };

        let store = Self {
            filaments: or_empty("filaments", filaments),
            accessories: or_empty("accessories", accessories),
            clients: or_empty("clients", clients),
            purchases: or_empty("purchases", purchases),
            projects: or_empty("projects", projects),
            config,
            deleted: or_empty("deleted records", deleted),
        };

        info!(
            "Loaded {} filaments, {} accessories, {} clients, {} purchases, {} projects, {} deleted records",
            store.filaments.len(),
            store.accessories.len(),
            store.clients.len(),
            store.purchases.len(),
            store.projects.len(),
            store.deleted.len()
        );
        store
    }

    /// Borrowed pricing inputs for [`crate::core::pricing::calculate_costs`]
    #[must_use]
    pub fn pricing(&self) -> PricingContext<'_> {
        PricingContext {
            filaments: &self.filaments,
            accessories: &self.accessories,
            config: &self.config,
        }
    }

    /// Price breakdown of `project` against the current inventory
    #[must_use]
    pub fn costs(&self, project: &project::Model) -> CalculationResult {
        self.pricing().costs(project)
    }

    /// Dashboard figures
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        compute_stats(&self.projects, &self.purchases, &self.pricing())
    }

    /// Projects without a client
    pub fn catalog_designs(&self) -> impl Iterator<Item = &project::Model> {
        self.projects.iter().filter(|p| p.client_id.is_none())
    }

    /// Projects sold to a client, pending or delivered
    pub fn orders(&self) -> impl Iterator<Item = &project::Model> {
        self.projects.iter().filter(|p| p.client_id.is_some())
    }

    /// Looks up a filament spool by id
    #[must_use]
    pub fn filament(&self, id: i64) -> Option<&filament::Model> {
        self.filaments.iter().find(|f| f.id == id)
    }

    /// Looks up an accessory by id
    #[must_use]
    pub fn accessory(&self, id: i64) -> Option<&accessory::Model> {
        self.accessories.iter().find(|a| a.id == id)
    }

    /// Looks up a client by id
    #[must_use]
    pub fn client(&self, id: i64) -> Option<&client::Model> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Looks up a project by id
    #[must_use]
    pub fn project(&self, id: i64) -> Option<&project::Model> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Looks up a purchase by id
    #[must_use]
    pub fn purchase(&self, id: i64) -> Option<&purchase::Model> {
        self.purchases.iter().find(|p| p.id == id)
    }
}

fn or_empty<T>(what: &str, fetched: Result<Vec<T>>) -> Vec<T> {
    fetched.unwrap_or_else(|e| {
        warn!("Failed to load {what}, continuing with none: {e}");
        Vec::new()
    })
}
