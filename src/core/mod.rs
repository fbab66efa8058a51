//! Core business logic for the workshop, independent of any front end.

/// Accessory inventory operations
pub mod accessory;
/// In-memory store of every collection
pub mod catalog;
/// Client directory operations
pub mod client;
/// Filament inventory operations
pub mod filament;
/// Global pricing configuration singleton
pub mod global_config;
/// Project lifecycle: selling and delivering
pub mod lifecycle;
/// Pricing engine
pub mod pricing;
/// Project (design and order) operations
pub mod project;
/// Purchase (expense) operations
pub mod purchase;
/// Restore snapshot storage
pub mod snapshot;
/// Dashboard statistics
pub mod stats;
/// Soft-delete archive
pub mod trash;
/// Shared input checks
pub mod validate;
