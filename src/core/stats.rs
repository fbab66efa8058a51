//! Dashboard statistics.
//!
//! Revenue, investment and the active order count are rolled up from the current
//! projects and purchases. The rollup is pure, so it is simply recomputed after
//! every refresh instead of being cached.

use crate::{
    core::pricing::{PricingContext, effective_price},
    entities::{project, purchase},
};
use serde::Serialize;

/// Aggregate figures shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of the effective price of every delivered project
    pub total_revenue: f64,
    /// Sum of every purchase amount
    pub investment: f64,
    /// Revenue minus investment
    pub net_balance: f64,
    /// Pending projects that have a client
    pub active_orders: usize,
}

/// Computes the dashboard statistics.
///
/// A delivered project counts with its manual price when it has one, otherwise
/// with its rounded computed price. Catalog designs never count as active orders.
#[must_use]
pub fn compute_stats(
    projects: &[project::Model],
    purchases: &[purchase::Model],
    pricing: &PricingContext<'_>,
) -> DashboardStats {
    let total_revenue: f64 = projects
        .iter()
        .filter(|p| p.status == project::ProjectStatus::Delivered)
        .map(|p| effective_price(p, &pricing.costs(p)))
        .sum();

    let investment: f64 = purchases.iter().map(|p| p.amount).sum();

    let active_orders = projects
        .iter()
        .filter(|p| p.status == project::ProjectStatus::Pending && p.client_id.is_some())
        .count();

    DashboardStats {
        total_revenue,
        investment,
        net_balance: total_revenue - investment,
        active_orders,
    }
}

/// Formats an amount with the currency symbol, no decimals and `.` as the
/// thousands separator, e.g. `-$12.500`.
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let whole = amount.abs().round() as i64;
    let digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && whole != 0 { "-" } else { "" };
    format!("{sign}{currency}{grouped}")
}
