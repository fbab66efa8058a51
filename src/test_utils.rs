//! Shared test utilities for the workshop ledger.
//!
//! This module provides helpers for setting up test databases, building form
//! inputs and plain models with sensible defaults, and a notifier that records
//! what it was asked.

use crate::{
    core::{
        accessory::{NewAccessory, create_accessory},
        client::{NewClient, create_client},
        filament::{NewFilament, create_filament},
        global_config::ensure_config,
        project::{NewProject, create_project},
        purchase::{NewPurchase, create_purchase},
    },
    entities::{accessory, client, filament, global_config, project, purchase},
    errors::Result,
    notify::Notifier,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::cell::{Cell, RefCell};

/// Creates an in-memory `SQLite` database with all tables initialized and the
/// default global configuration stored.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    ensure_config(&db, &global_config::Model::default()).await?;
    Ok(db)
}

/// Builds a filament form input.
///
/// # Defaults
/// * `brand`: "Grilon3"
/// * `material`: PLA
/// * `color`: "Negro"
/// * `remaining_weight`: the full spool
#[must_use]
pub fn new_filament(name: &str, price: f64, weight_grams: f64) -> NewFilament {
    NewFilament {
        name: name.to_string(),
        brand: "Grilon3".to_string(),
        material: filament::Material::Pla,
        weight_grams,
        price,
        color: "Negro".to_string(),
        remaining_weight: weight_grams,
    }
}

/// Creates a test filament: a full 1000 g spool that cost 10000.
pub async fn create_test_filament(db: &DatabaseConnection, name: &str) -> Result<filament::Model> {
    create_filament(db, new_filament(name, 10000.0, 1000.0)).await
}

/// Creates a test accessory with the given unit cost.
pub async fn create_test_accessory(
    db: &DatabaseConnection,
    name: &str,
    cost: f64,
) -> Result<accessory::Model> {
    create_accessory(
        db,
        NewAccessory {
            name: name.to_string(),
            cost,
        },
    )
    .await
}

/// Creates a test client with an empty contact.
pub async fn create_test_client(db: &DatabaseConnection, name: &str) -> Result<client::Model> {
    create_client(
        db,
        NewClient {
            name: name.to_string(),
            contact: String::new(),
        },
    )
    .await
}

/// Builds a purchase form input for one filament unit.
#[must_use]
pub fn new_purchase(name: &str, amount: f64) -> NewPurchase {
    NewPurchase {
        kind: purchase::PurchaseKind::Filament,
        name: name.to_string(),
        amount,
        quantity: 1,
    }
}

/// Creates a test purchase dated now.
pub async fn create_test_purchase(
    db: &DatabaseConnection,
    name: &str,
    amount: f64,
) -> Result<purchase::Model> {
    create_purchase(db, new_purchase(name, amount)).await
}

/// Builds a project form input for an empty catalog design.
///
/// # Defaults
/// * no client, pending status
/// * no materials, zero hours and labor
/// * no multiplier, margin or manual price
#[must_use]
pub fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: None,
        client_id: None,
        manual_price: None,
        status: project::ProjectStatus::Pending,
        filaments: project::FilamentUsages::default(),
        accessories: project::AccessoryUsages::default(),
        printing_hours: 0.0,
        post_processing_cost: 0.0,
        complexity_multiplier: None,
        profit_margin: None,
    }
}

/// Creates a test catalog design from [`new_project`].
pub async fn create_test_project(db: &DatabaseConnection, name: &str) -> Result<project::Model> {
    create_project(db, new_project(name)).await
}

/// Plain project model for pure tests, shaped like [`new_project`].
#[must_use]
pub fn project_model(id: i64, client_id: Option<i64>) -> project::Model {
    let new = new_project("Proyecto");
    project::Model {
        id,
        name: new.name,
        description: new.description,
        client_id,
        manual_price: new.manual_price,
        status: new.status,
        filaments: new.filaments,
        accessories: new.accessories,
        printing_hours: new.printing_hours,
        post_processing_cost: new.post_processing_cost,
        complexity_multiplier: new.complexity_multiplier,
        profit_margin: new.profit_margin,
        created_at: Utc::now(),
    }
}

/// Plain filament model for pure tests.
#[must_use]
pub fn filament_model(id: i64, price: f64, weight_grams: f64) -> filament::Model {
    let new = new_filament("Filamento", price, weight_grams);
    filament::Model {
        id,
        name: new.name,
        brand: new.brand,
        material: new.material,
        weight_grams,
        price,
        color: new.color,
        remaining_weight: weight_grams,
    }
}

/// Plain accessory model for pure tests.
#[must_use]
pub fn accessory_model(id: i64, cost: f64) -> accessory::Model {
    accessory::Model {
        id,
        name: "Accesorio".to_string(),
        cost,
    }
}

/// Plain purchase model for pure tests.
#[must_use]
pub fn purchase_model(id: i64, amount: f64) -> purchase::Model {
    purchase::Model {
        id,
        kind: purchase::PurchaseKind::Accessory,
        name: "Compra".to_string(),
        amount,
        quantity: 1,
        date: Utc::now(),
    }
}

/// Notifier that records alerts and answers every confirmation the same way.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    answer: bool,
    alerts: RefCell<Vec<(String, String)>>,
    confirmations: Cell<usize>,
}

impl RecordingNotifier {
    /// Creates a notifier that answers `answer` to every confirmation.
    #[must_use]
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    /// Most recent alert as `(title, message)`
    #[must_use]
    pub fn last_alert(&self) -> Option<(String, String)> {
        self.alerts.borrow().last().cloned()
    }

    /// How many confirmations were requested
    #[must_use]
    pub fn confirmations(&self) -> usize {
        self.confirmations.get()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, title: &str, message: &str) {
        self.alerts
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
    }

    fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.confirmations.set(self.confirmations.get() + 1);
        self.answer
    }
}
