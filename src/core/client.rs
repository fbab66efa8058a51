//! Client operations.
//!
//! Clients are not archived: deleting one removes it outright and leaves any
//! orders pointing at its id untouched.

use crate::{
    core::validate,
    entities::{Client, client},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fields of a client as entered on the clients form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// Client name
    pub name: String,
    /// Free-text contact details
    pub contact: String,
}

/// Retrieves every client, ordered alphabetically by name.
pub async fn get_all_clients(db: &DatabaseConnection) -> Result<Vec<client::Model>> {
    Client::find()
        .order_by_asc(client::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific client by its unique ID.
pub async fn get_client_by_id<C>(db: &C, client_id: i64) -> Result<Option<client::Model>>
where
    C: ConnectionTrait,
{
    Client::find_by_id(client_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new client.
///
/// # Errors
/// Returns a validation error for a blank name, or a database error.
pub async fn create_client(db: &DatabaseConnection, new: NewClient) -> Result<client::Model> {
    let name = validate::name("name", &new.name)?;

    let client = client::ActiveModel {
        name: Set(name),
        contact: Set(new.contact.trim().to_string()),
        ..Default::default()
    };
    let created = client.insert(db).await?;
    info!("Created client {} ({})", created.id, created.name);
    Ok(created)
}

/// Permanently deletes a client.
///
/// # Errors
/// Returns [`Error::NotFound`] if the client does not exist.
pub async fn delete_client(db: &DatabaseConnection, client_id: i64) -> Result<()> {
    let result = Client::delete_by_id(client_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "client",
            id: client_id,
        });
    }
    info!("Deleted client {client_id}");
    Ok(())
}
