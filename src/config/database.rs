//! Database configuration module for the workshop ledger.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models
//! without hand-written SQL.

use crate::entities::{Accessory, Client, DeletedRecord, Filament, GlobalConfig, Project, Purchase};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityName, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/workshop.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back
/// to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
///
/// For a file-backed `SQLite` URL the parent directory is created first.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if let Some(parent) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(parent)?;
    }
    info!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let file = rest.split('?').next().unwrap_or(rest);
    Path::new(file)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

/// Creates every table that does not exist yet.
///
/// Safe to call on every start: existing tables and their rows are left alone.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Filament).await?;
    create_table(db, Accessory).await?;
    create_table(db, Client).await?;
    create_table(db, Purchase).await?;
    create_table(db, Project).await?;
    create_table(db, DeletedRecord).await?;
    create_table(db, GlobalConfig).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    debug!("Ensuring table {}", entity.table_name());
    db.execute(builder.build(&statement)).await?;
    Ok(())
}
