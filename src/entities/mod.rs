//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables. Each entity has a Model struct for
//! data and an Entity struct for operations. Models serialize with camelCase field
//! names while columns keep SeaORM's snake_case naming.

pub mod accessory;
pub mod client;
pub mod deleted_record;
pub mod filament;
pub mod global_config;
pub mod project;
pub mod purchase;

// Re-export specific types to avoid conflicts
pub use accessory::{Column as AccessoryColumn, Entity as Accessory, Model as AccessoryModel};
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use deleted_record::{
    Column as DeletedRecordColumn, Entity as DeletedRecord, ItemType, Model as DeletedRecordModel,
};
pub use filament::{Column as FilamentColumn, Entity as Filament, Material, Model as FilamentModel};
pub use global_config::{
    Column as GlobalConfigColumn, Entity as GlobalConfig, Model as GlobalConfigModel,
};
pub use project::{
    AccessoryUsage, AccessoryUsages, Column as ProjectColumn, Entity as Project, FilamentUsage,
    FilamentUsages, Model as ProjectModel, ProjectStatus,
};
pub use purchase::{Column as PurchaseColumn, Entity as Purchase, Model as PurchaseModel, PurchaseKind};
