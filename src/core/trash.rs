//! Soft-delete archive.
//!
//! Deleting a filament, accessory, project or purchase archives it as a
//! [`deleted_record::Model`] plus a full JSON snapshot in a [`SnapshotStore`].
//! Restoring rebuilds the item from that snapshot under a fresh id.
//!
//! Both directions run inside one database transaction. The snapshot is written
//! before the commit and removed again if anything after it fails; on restore it
//! is only cleared once the commit went through.

use crate::{
    core::{
        accessory::{NewAccessory, create_accessory, delete_accessory},
        filament::{NewFilament, create_filament, delete_filament},
        pricing::{PricingContext, effective_price},
        project::{NewProject, delete_project, insert_project},
        purchase::{NewPurchase, delete_purchase, insert_purchase},
        snapshot::SnapshotStore,
    },
    entities::{
        DeletedRecord, ItemType, accessory, deleted_record, filament, project, purchase,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{DatabaseTransaction, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::{error, info, warn};

/// An item that can be moved to the trash
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrashItem {
    /// A filament spool
    Filament(filament::Model),
    /// An accessory
    Accessory(accessory::Model),
    /// A catalog design or an order
    Project(project::Model),
    /// A recorded expense
    Purchase(purchase::Model),
}

impl TrashItem {
    /// Archive tag of the item. Projects are designs without a client and orders with one.
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Filament(_) => ItemType::Filament,
            Self::Accessory(_) => ItemType::Accessory,
            Self::Project(p) if p.client_id.is_none() => ItemType::Design,
            Self::Project(_) => ItemType::Order,
            Self::Purchase(_) => ItemType::Purchase,
        }
    }

    /// Display label
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Filament(f) => &f.name,
            Self::Accessory(a) => &a.name,
            Self::Project(p) => &p.name,
            Self::Purchase(p) => &p.name,
        }
    }

    /// Id of the live row
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Filament(f) => f.id,
            Self::Accessory(a) => a.id,
            Self::Project(p) => p.id,
            Self::Purchase(p) => p.id,
        }
    }
}

/// Which entity a restore recreates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreKind {
    /// Recreate a filament
    Filament,
    /// Recreate an accessory
    Accessory,
    /// Recreate a project, design or order alike
    Project,
    /// Recreate a purchase
    Purchase,
}

impl From<ItemType> for RestoreKind {
    fn from(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Filament => Self::Filament,
            ItemType::Accessory => Self::Accessory,
            ItemType::Design | ItemType::Order => Self::Project,
            ItemType::Purchase => Self::Purchase,
        }
    }
}

/// Everything recorded about an item when it is deleted
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionEntry {
    /// Archive tag
    pub item_type: ItemType,
    /// Display label
    pub item_name: String,
    /// Effective price of a project at deletion time
    pub original_price: Option<f64>,
    /// Profit of a project at deletion time
    pub original_profit: Option<f64>,
    /// Whether the project had been delivered
    pub was_sold: bool,
    /// Full JSON snapshot of the item, id included
    pub original_data: String,
}

impl DeletionEntry {
    /// Builds the archive entry of `item`, pricing projects against `pricing`.
    ///
    /// # Errors
    /// Returns [`Error::Serialization`] if the snapshot cannot be encoded.
    pub fn new(item: &TrashItem, pricing: &PricingContext<'_>) -> Result<Self> {
        let (original_price, original_profit, was_sold) = match item {
            TrashItem::Project(p) => {
                let costs = pricing.costs(p);
                (
                    Some(effective_price(p, &costs)),
                    Some(costs.profit_amount),
                    p.status == project::ProjectStatus::Delivered,
                )
            }
            _ => (None, None, false),
        };

        Ok(Self {
            item_type: item.item_type(),
            item_name: item.name().to_string(),
            original_price,
            original_profit,
            was_sold,
            original_data: serde_json::to_string(item)?,
        })
    }
}

/// A deleted record with its snapshot, as shown in the trash view
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedItem {
    /// The archive row
    pub record: deleted_record::Model,
    /// Snapshot text, `None` if it is missing or unreadable
    pub original_data: Option<String>,
}

/// Moves `item` to the trash and deletes the live row.
///
/// # Errors
/// Returns an error if the item no longer exists, the snapshot cannot be
/// written, or the transaction fails. Nothing is archived in that case.
pub async fn soft_delete<S>(
    db: &DatabaseConnection,
    snapshots: &S,
    item: &TrashItem,
    pricing: &PricingContext<'_>,
) -> Result<deleted_record::Model>
where
    S: SnapshotStore + ?Sized,
{
    let entry = DeletionEntry::new(item, pricing)?;

    let txn = db.begin().await?;
    let record = deleted_record::ActiveModel {
        item_type: Set(entry.item_type.as_tag().to_string()),
        item_name: Set(entry.item_name.clone()),
        deleted_at: Set(Utc::now()),
        original_price: Set(entry.original_price),
        original_profit: Set(entry.original_profit),
        was_sold: Set(entry.was_sold),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    snapshots.save(record.id, &entry.original_data)?;

    if let Err(e) = delete_and_commit(txn, item).await {
        discard_snapshot(snapshots, record.id);
        return Err(e);
    }

    info!(
        "Moved {} '{}' (id {}) to trash as record {}",
        entry.item_type,
        entry.item_name,
        item.id(),
        record.id
    );
    Ok(record)
}

async fn delete_and_commit(txn: DatabaseTransaction, item: &TrashItem) -> Result<()> {
    match item {
        TrashItem::Filament(f) => delete_filament(&txn, f.id).await?,
        TrashItem::Accessory(a) => delete_accessory(&txn, a.id).await?,
        TrashItem::Project(p) => delete_project(&txn, p.id).await?,
        TrashItem::Purchase(p) => delete_purchase(&txn, p.id).await?,
    }
    txn.commit().await?;
    Ok(())
}

fn discard_snapshot<S>(snapshots: &S, record_id: i64)
where
    S: SnapshotStore + ?Sized,
{
    if let Err(e) = snapshots.remove(record_id) {
        warn!("Could not remove snapshot of record {record_id}: {e}");
    }
}

/// Recreates the item archived as `record_id` and removes it from the trash.
///
/// The item gets a new id; every other field, timestamps included, comes from
/// the snapshot.
///
/// # Errors
/// Any failure is reported as [`Error::RestoreFailed`] and leaves both the
/// record and its snapshot in place.
pub async fn restore<S>(db: &DatabaseConnection, snapshots: &S, record_id: i64) -> Result<TrashItem>
where
    S: SnapshotStore + ?Sized,
{
    match try_restore(db, snapshots, record_id).await {
        Ok(item) => {
            info!(
                "Restored record {record_id} as {} '{}' (id {})",
                item.item_type(),
                item.name(),
                item.id()
            );
            Ok(item)
        }
        Err(e) => {
            error!("Failed to restore record {record_id}: {e}");
            Err(Error::RestoreFailed {
                id: record_id,
                reason: e.to_string(),
            })
        }
    }
}

async fn try_restore<S>(db: &DatabaseConnection, snapshots: &S, record_id: i64) -> Result<TrashItem>
where
    S: SnapshotStore + ?Sized,
{
    let record = DeletedRecord::find_by_id(record_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "deleted record",
            id: record_id,
        })?;

    let kind = record.kind().map(RestoreKind::from).ok_or_else(|| {
        Error::validation("item_type", format!("unknown tag '{}'", record.item_type))
    })?;

    let data = snapshots.load(record_id)?.ok_or_else(|| Error::Snapshot {
        message: format!("no snapshot stored for record {record_id}"),
    })?;

    let txn = db.begin().await?;
    let restored = match kind {
        RestoreKind::Filament => {
            let snapshot: NewFilament = serde_json::from_str(&data)?;
            TrashItem::Filament(create_filament(&txn, snapshot).await?)
        }
        RestoreKind::Accessory => {
            let snapshot: NewAccessory = serde_json::from_str(&data)?;
            TrashItem::Accessory(create_accessory(&txn, snapshot).await?)
        }
        RestoreKind::Project => {
            let snapshot: project::Model = serde_json::from_str(&data)?;
            let created_at = snapshot.created_at;
            TrashItem::Project(insert_project(&txn, NewProject::from(snapshot), created_at).await?)
        }
        RestoreKind::Purchase => {
            let snapshot: purchase::Model = serde_json::from_str(&data)?;
            let date = snapshot.date;
            TrashItem::Purchase(insert_purchase(&txn, NewPurchase::from(snapshot), date).await?)
        }
    };

    DeletedRecord::delete_by_id(record_id).exec(&txn).await?;
    txn.commit().await?;

    discard_snapshot(snapshots, record_id);
    Ok(restored)
}

/// Lists the trash newest first, each record with its snapshot attached.
///
/// A snapshot that cannot be read is logged and reported as `None`.
pub async fn list_deleted<S>(db: &DatabaseConnection, snapshots: &S) -> Result<Vec<ArchivedItem>>
where
    S: SnapshotStore + ?Sized,
{
    let records = DeletedRecord::find()
        .order_by_desc(deleted_record::Column::DeletedAt)
        .all(db)
        .await?;

    Ok(records
        .into_iter()
        .map(|record| {
            let original_data = snapshots.load(record.id).unwrap_or_else(|e| {
                warn!("Snapshot of record {} unavailable: {e}", record.id);
                None
            });
            ArchivedItem {
                record,
                original_data,
            }
        })
        .collect())
}

/// Permanently deletes a trash record and its snapshot.
///
/// # Errors
/// Returns [`Error::NotFound`] if there is no such record.
pub async fn purge<S>(db: &DatabaseConnection, snapshots: &S, record_id: i64) -> Result<()>
where
    S: SnapshotStore + ?Sized,
{
    let result = DeletedRecord::delete_by_id(record_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "deleted record",
            id: record_id,
        });
    }
    discard_snapshot(snapshots, record_id);
    info!("Purged record {record_id} from trash");
    Ok(())
}
