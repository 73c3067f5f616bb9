//! Valuation engine.
//!
//! Turns a property description into a low/median/high range:
//! - `types`: request attributes and the estimate returned
//! - `factors`: every tunable coefficient, with defaults
//! - `adjustments`: one multiplier per attribute
//! - `range`: uncertainty band around the point estimate
//! - `currency`: PEN/USD conversion and formatting
//! - `pipeline`: the [`Appraiser`] tying it all together

pub mod adjustments;
pub mod currency;
pub mod factors;
pub mod pipeline;
pub mod range;
pub mod types;

pub use currency::Currency;
pub use factors::FactorConfig;
pub use pipeline::Appraiser;
pub use types::{
    AppliedFactor, Appraisal, ConditionGrade, ElevatorSelection, EnergyGrade, FormattedRange,
    PropertyInput, PropertyProfile, PropertyType, ValuationResult,
};
