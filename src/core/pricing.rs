//! Pricing engine - turns a project's bill of materials into a price breakdown.
//!
//! Everything here is pure: no I/O, no mutation of the inputs, and the same
//! inputs always give the same [`CalculationResult`].
//!
//! The breakdown is computed as:
//! 1. filament cost, each usage charged `grams_used * price / weight_grams`
//! 2. accessory cost, each usage charged `cost * quantity`
//! 3. energy cost, `hours * (watts / 1000) * rate per kWh`
//! 4. labor, the project's post-processing cost
//! 5. subtotal, the sum of the above times the complexity multiplier
//! 6. profit, subtotal times the margin percent
//! 7. total, subtotal plus profit, and its ceiling to the next multiple of 100
//!
//! A usage pointing at a filament or accessory that no longer exists adds nothing.
//! No bounds are checked: negative grams or quantities lower the cost, and a spool
//! weight of zero yields a non-finite cost (inventory validation keeps such spools
//! out of storage).

use crate::entities::{accessory, filament, global_config, project};
use serde::Serialize;

/// Granularity of [`CalculationResult::rounded_price`]
pub const PRICE_ROUNDING_STEP: f64 = 100.0;

/// Price breakdown of one project. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Material cost of all filament usages
    pub total_filament_cost: f64,
    /// Cost of all accessory usages
    pub total_accessory_cost: f64,
    /// Electricity cost of the print
    pub energy_cost: f64,
    /// Post-processing labor
    pub labor_cost: f64,
    /// Production cost including the complexity multiplier
    pub subtotal: f64,
    /// Profit on top of the subtotal
    pub profit_amount: f64,
    /// Subtotal plus profit
    pub total_price: f64,
    /// Total price rounded up to the next multiple of 100
    pub rounded_price: f64,
}

/// Borrowed view of everything the engine needs besides the project itself
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    /// Filament inventory
    pub filaments: &'a [filament::Model],
    /// Accessory inventory
    pub accessories: &'a [accessory::Model],
    /// Global pricing parameters
    pub config: &'a global_config::Model,
}

impl PricingContext<'_> {
    /// Runs [`calculate_costs`] against this context
    #[must_use]
    pub fn costs(&self, project: &project::Model) -> CalculationResult {
        calculate_costs(project, self.filaments, self.accessories, self.config)
    }
}

/// Computes the full price breakdown of a project.
#[must_use]
pub fn calculate_costs(
    project: &project::Model,
    filaments: &[filament::Model],
    accessories: &[accessory::Model],
    config: &global_config::Model,
) -> CalculationResult {
    let total_filament_cost = filament_cost(&project.filaments.0, filaments);
    let total_accessory_cost = accessory_cost(&project.accessories.0, accessories);
    let energy_cost = energy_cost(project.printing_hours, config);
    let labor_cost = labor_cost(project.post_processing_cost);

    let base_production = total_filament_cost + total_accessory_cost + energy_cost + labor_cost;
    let subtotal = base_production * project.complexity_multiplier.unwrap_or(1.0);

    let margin = project
        .profit_margin
        .unwrap_or(config.default_profit_margin);
    let profit_amount = subtotal * (margin / 100.0);
    let total_price = subtotal + profit_amount;

    CalculationResult {
        total_filament_cost,
        total_accessory_cost,
        energy_cost,
        labor_cost,
        subtotal,
        profit_amount,
        total_price,
        rounded_price: round_up_price(total_price),
    }
}

/// Sums the proportional spool cost of every usage whose filament still exists.
#[must_use]
pub fn filament_cost(usages: &[project::FilamentUsage], filaments: &[filament::Model]) -> f64 {
    usages
        .iter()
        .filter_map(|usage| {
            filaments
                .iter()
                .find(|f| f.id == usage.filament_id)
                .map(|f| usage.grams_used * f.price / f.weight_grams)
        })
        .sum()
}

/// Sums `cost * quantity` for every usage whose accessory still exists.
#[must_use]
pub fn accessory_cost(usages: &[project::AccessoryUsage], accessories: &[accessory::Model]) -> f64 {
    usages
        .iter()
        .filter_map(|usage| {
            accessories
                .iter()
                .find(|a| a.id == usage.accessory_id)
                .map(|a| a.cost * usage.quantity)
        })
        .sum()
}

/// Electricity cost of `printing_hours` at the configured power and rate.
#[must_use]
pub fn energy_cost(printing_hours: f64, config: &global_config::Model) -> f64 {
    printing_hours * (config.printer_power_watts / 1000.0) * config.energy_rate_kwh
}

/// Labor as entered; anything that is not a finite number counts as zero.
#[must_use]
pub fn labor_cost(post_processing_cost: f64) -> f64 {
    if post_processing_cost.is_finite() {
        post_processing_cost
    } else {
        0.0
    }
}

/// Ceiling of `total_price` to the next multiple of [`PRICE_ROUNDING_STEP`].
#[must_use]
pub fn round_up_price(total_price: f64) -> f64 {
    (total_price / PRICE_ROUNDING_STEP).ceil() * PRICE_ROUNDING_STEP
}

/// The price a project sells for: its manual price if set, else the rounded price.
#[must_use]
pub fn effective_price(project: &project::Model, costs: &CalculationResult) -> f64 {
    project.manual_price.unwrap_or(costs.rounded_price)
}
