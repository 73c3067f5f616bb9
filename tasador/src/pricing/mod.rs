//! Price per square meter by district and zone.
//!
//! The valuation pipeline only depends on the [`PriceLookup`] contract;
//! [`PriceTable`] is the in-memory implementation backed by the built-in
//! Lima dataset or a JSON file.

pub mod table;

pub use table::{DistrictPrices, DistrictSummary, PriceTable, ZonePrice};

/// Read-only source of base prices.
///
/// Zones are scoped to their district: the same zone name under another
/// district is a different (or unknown) zone.
pub trait PriceLookup: Send + Sync {
    /// Price per m² in soles, or `None` for an unknown district/zone.
    fn price_per_sqm(&self, district: &str, zone: &str) -> Option<f64>;
}
