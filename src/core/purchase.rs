//! Purchase (expense) operations.
//!
//! Purchases are listed newest first. The `date` is stamped on creation and kept on
//! updates; restoring an archived purchase carries its original date back.

use crate::{
    core::validate,
    entities::{Purchase, purchase},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fields of a purchase as entered on the expense form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    /// Expense category
    #[serde(rename = "type")]
    pub kind: purchase::PurchaseKind,
    /// What was bought
    pub name: String,
    /// Total amount paid
    pub amount: f64,
    /// Number of units bought
    pub quantity: i64,
}

impl From<purchase::Model> for NewPurchase {
    fn from(model: purchase::Model) -> Self {
        Self {
            kind: model.kind,
            name: model.name,
            amount: model.amount,
            quantity: model.quantity,
        }
    }
}

impl NewPurchase {
    /// Checks the amount and returns the trimmed name.
    ///
    /// # Errors
    /// Returns a validation error for a blank name or a negative amount.
    pub fn validate(&self) -> Result<String> {
        let name = validate::name("name", &self.name)?;
        validate::non_negative("amount", self.amount)?;
        Ok(name)
    }
}

/// Retrieves every purchase, newest first.
pub async fn get_all_purchases(db: &DatabaseConnection) -> Result<Vec<purchase::Model>> {
    Purchase::find()
        .order_by_desc(purchase::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a new purchase dated now.
pub async fn create_purchase<C>(db: &C, new: NewPurchase) -> Result<purchase::Model>
where
    C: ConnectionTrait,
{
    insert_purchase(db, new, Utc::now()).await
}

/// Records a purchase with an explicit date.
///
/// # Errors
/// Returns an error if validation or the insert fails.
pub async fn insert_purchase<C>(
    db: &C,
    new: NewPurchase,
    date: DateTime<Utc>,
) -> Result<purchase::Model>
where
    C: ConnectionTrait,
{
    let name = new.validate()?;

    let purchase = purchase::ActiveModel {
        kind: Set(new.kind),
        name: Set(name),
        amount: Set(new.amount),
        quantity: Set(new.quantity),
        date: Set(date),
        ..Default::default()
    };
    let created = purchase.insert(db).await?;
    info!("Recorded purchase {} ({}: {})", created.id, created.name, created.amount);
    Ok(created)
}

/// Replaces the editable fields of a purchase, keeping its date.
pub async fn update_purchase(
    db: &DatabaseConnection,
    purchase_id: i64,
    changes: NewPurchase,
) -> Result<purchase::Model> {
    let name = changes.validate()?;

    let mut purchase: purchase::ActiveModel = Purchase::find_by_id(purchase_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "purchase",
            id: purchase_id,
        })?
        .into();

    purchase.kind = Set(changes.kind);
    purchase.name = Set(name);
    purchase.amount = Set(changes.amount);
    purchase.quantity = Set(changes.quantity);

    purchase.update(db).await.map_err(Into::into)
}

/// Permanently deletes a purchase row.
pub async fn delete_purchase<C>(db: &C, purchase_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Purchase::delete_by_id(purchase_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "purchase",
            id: purchase_id,
        });
    }
    Ok(())
}
