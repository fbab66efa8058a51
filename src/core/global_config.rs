//! Global configuration singleton - pricing parameters shared by every project.
//!
//! Exactly one row with id [`global_config::SINGLETON_ID`] exists once
//! [`ensure_config`] has run. Updates go through [`upsert_config`], which creates the
//! row when it is missing.

use crate::{
    core::validate,
    entities::{GlobalConfig, global_config},
    errors::Result,
};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use tracing::info;

/// Reads the configuration row, `None` if it was never created.
pub async fn get_config(db: &DatabaseConnection) -> Result<Option<global_config::Model>> {
    GlobalConfig::find_by_id(global_config::SINGLETON_ID)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the configuration row, creating it from `defaults` if absent.
pub async fn ensure_config(
    db: &DatabaseConnection,
    defaults: &global_config::Model,
) -> Result<global_config::Model> {
    if let Some(existing) = get_config(db).await? {
        return Ok(existing);
    }
    info!("No global configuration found, creating it with defaults");
    upsert_config(db, defaults).await
}

/// Checks the pricing parameters.
///
/// # Errors
/// Returns a validation error for negative rates or power, a non-finite margin,
/// or a blank currency symbol.
pub fn validate_config(config: &global_config::Model) -> Result<()> {
    validate::non_negative("energy_rate_kwh", config.energy_rate_kwh)?;
    validate::non_negative("printer_power_watts", config.printer_power_watts)?;
    validate::finite("default_profit_margin", config.default_profit_margin)?;
    validate::name("currency", &config.currency)?;
    Ok(())
}

/// Inserts or replaces the configuration row. The id of `config` is ignored.
pub async fn upsert_config(
    db: &DatabaseConnection,
    config: &global_config::Model,
) -> Result<global_config::Model> {
    validate_config(config)?;

    let row = global_config::ActiveModel {
        id: Set(global_config::SINGLETON_ID),
        energy_rate_kwh: Set(config.energy_rate_kwh),
        printer_power_watts: Set(config.printer_power_watts),
        default_profit_margin: Set(config.default_profit_margin),
        currency: Set(config.currency.trim().to_string()),
    };

    GlobalConfig::insert(row)
        .on_conflict(
            OnConflict::column(global_config::Column::Id)
                .update_columns([
                    global_config::Column::EnergyRateKwh,
                    global_config::Column::PrinterPowerWatts,
                    global_config::Column::DefaultProfitMargin,
                    global_config::Column::Currency,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    info!(
        "Saved global configuration: {} per kWh, {} W, {}% margin, currency {}",
        config.energy_rate_kwh,
        config.printer_power_watts,
        config.default_profit_margin,
        config.currency
    );

    GlobalConfig::find_by_id(global_config::SINGLETON_ID)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("config".to_string()).into())
}
