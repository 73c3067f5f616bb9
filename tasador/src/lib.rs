//! tasador - Property appraisal for Lima.
//!
//! A price per m² by district and zone, adjusted by multiplicative factors
//! for the property's attributes, gives a point estimate and a range around
//! it, optionally converted to US dollars.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod error;
pub mod exchange;
pub mod pricing;
pub mod routes;
pub mod valuation;

pub use error::EstimateError;
pub use exchange::{ExchangeRateProvider, FixedRate, OpenErApiProvider};
pub use pricing::{PriceLookup, PriceTable};
pub use routes::{build_router, AppState};
pub use valuation::{Appraiser, Currency, FactorConfig, PropertyInput, ValuationResult};
