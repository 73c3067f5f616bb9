//! Valuation pipeline.
//!
//! lookup → weighted area → age → bedrooms → bathrooms → floor/elevator →
//! energy → condition → property type → range band → currency.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

use super::adjustments::{
    age_factor, condition_factor, energy_factor, floor_factor, room_factor, type_factor,
    weighted_area,
};
use super::factors::FactorConfig;
use super::range;
use super::types::{
    AppliedFactor, Appraisal, FormattedRange, PropertyInput, PropertyProfile, ValuationResult,
};
use crate::error::EstimateError;
use crate::exchange::ExchangeRateProvider;
use crate::pricing::PriceLookup;

/// Produces estimates from a factor table, a price lookup and an exchange
/// rate provider. Holds no per-request state.
pub struct Appraiser {
    factors: Arc<FactorConfig>,
    prices: Arc<dyn PriceLookup>,
    rates: Arc<dyn ExchangeRateProvider>,
}

impl Appraiser {
    /// Create with the default factor table.
    pub fn new(prices: Arc<dyn PriceLookup>, rates: Arc<dyn ExchangeRateProvider>) -> Self {
        Self::with_factors(Arc::new(FactorConfig::default()), prices, rates)
    }

    /// Create with a custom factor table.
    pub fn with_factors(
        factors: Arc<FactorConfig>,
        prices: Arc<dyn PriceLookup>,
        rates: Arc<dyn ExchangeRateProvider>,
    ) -> Self {
        Self {
            factors,
            prices,
            rates,
        }
    }

    pub fn factors(&self) -> &FactorConfig {
        &self.factors
    }

    /// Validate, look up the base price and run the adjustment chain.
    /// Amounts are in soles.
    pub fn appraise(&self, input: &PropertyInput) -> Result<Appraisal, EstimateError> {
        let errors = input.validate();
        if !errors.is_empty() {
            debug!(count = errors.len(), "Input rejected");
            return Err(EstimateError::Validation(errors));
        }

        let price_per_sqm = self
            .prices
            .price_per_sqm(&input.district, &input.zone)
            .ok_or_else(|| {
                debug!(district = %input.district, zone = %input.zone, "Unknown zone");
                EstimateError::UnknownZone {
                    district: input.district.clone(),
                    zone: input.zone.clone(),
                }
            })?;

        Ok(self.appraise_with_price(&input.profile(), price_per_sqm))
    }

    /// Run the adjustment chain and range band for a known base price.
    pub fn appraise_with_price(&self, profile: &PropertyProfile, price_per_sqm: f64) -> Appraisal {
        let f = &*self.factors;

        let weighted_area =
            weighted_area(profile.covered_area, profile.free_area, profile.kind, &f.free_area);
        let base_value = price_per_sqm * weighted_area;

        let stages = [
            ("age", age_factor(profile.age_years, &f.age)),
            ("bedrooms", room_factor(profile.bedrooms, &f.bedrooms)),
            ("bathrooms", room_factor(profile.bathrooms, &f.bathrooms)),
            (
                "floor_elevator",
                floor_factor(profile.kind, profile.floor, profile.elevator.has_elevator(), f),
            ),
            ("energy", energy_factor(profile.energy, &f.energy)),
            ("condition", condition_factor(profile.condition, &f.condition)),
            ("property_type", type_factor(profile.kind, &f.property_type)),
        ];

        let mut value = base_value;
        let mut factors = Vec::with_capacity(stages.len());
        for (name, multiplier) in stages {
            value *= multiplier;
            trace!(stage = name, multiplier, value, "Applied factor");

            if value < 0.0 {
                error!(stage = name, multiplier, value, "Valuation went negative");
            }
            debug_assert!(value >= 0.0, "valuation negative after {name} stage");

            factors.push(AppliedFactor {
                name: name.to_string(),
                multiplier,
                value_after: value,
            });
        }

        let band = range::band(profile, &f.band);
        let (low, high) = range::spread(value, band);

        Appraisal {
            price_per_sqm,
            weighted_area,
            base_value,
            factors,
            median: value,
            band,
            low,
            high,
        }
    }

    /// Full estimate in the requested currency.
    ///
    /// The exchange rate provider is only consulted for USD.
    pub async fn estimate(&self, input: &PropertyInput) -> Result<ValuationResult, EstimateError> {
        let appraisal = self.appraise(input)?;
        let currency = input.currency;

        let exchange_rate = if currency.needs_rate() {
            let rate = self.rates.pen_per_usd().await;
            debug!(provider = self.rates.name(), rate, "Using exchange rate");
            Some(rate)
        } else {
            None
        };
        let rate = exchange_rate.unwrap_or(1.0);

        let low = currency.convert(appraisal.low, rate);
        let median = currency.convert(appraisal.median, rate);
        let high = currency.convert(appraisal.high, rate);

        let summary = format!(
            "Estimate for {} in {}, {}",
            input.property_type.trim().to_lowercase(),
            input.zone,
            input.district
        );

        info!(
            district = %input.district,
            zone = %input.zone,
            property_type = %input.property_type,
            median_pen = appraisal.median,
            band = appraisal.band,
            currency = %currency,
            "Estimate computed"
        );

        Ok(ValuationResult {
            low,
            median,
            high,
            currency,
            currency_label: currency.label().to_string(),
            band: appraisal.band,
            exchange_rate,
            formatted: FormattedRange {
                low: currency.format(low),
                median: currency.format(median),
                high: currency.format(high),
            },
            summary,
            breakdown: appraisal,
            estimated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::FixedRate;
    use crate::pricing::PriceTable;
    use crate::valuation::types::{ElevatorSelection, PropertyType};

    fn appraiser() -> Appraiser {
        Appraiser::new(Arc::new(PriceTable::lima_2024()), Arc::new(FixedRate::default()))
    }

    fn house_profile() -> PropertyProfile {
        PropertyProfile {
            kind: Some(PropertyType::House),
            covered_area: 100.0,
            free_area: 50.0,
            bedrooms: 2,
            bathrooms: 2,
            floor: 12,
            elevator: ElevatorSelection::Without,
            age_years: 1,
            energy: None,
            condition: None,
        }
    }

    #[test]
    fn test_stage_order() {
        let appraisal = appraiser().appraise_with_price(&house_profile(), 1000.0);
        let names: Vec<&str> = appraisal.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "age",
                "bedrooms",
                "bathrooms",
                "floor_elevator",
                "energy",
                "condition",
                "property_type"
            ]
        );
    }

    #[test]
    fn test_house_skips_floor_and_gets_type_premium() {
        let appraisal = appraiser().appraise_with_price(&house_profile(), 1000.0);

        // 100 + 50 * 0.40
        assert!((appraisal.weighted_area - 120.0).abs() < 1e-9);
        assert!((appraisal.base_value - 120_000.0).abs() < 1e-6);
        assert_eq!(appraisal.factors[3].multiplier, 1.0);
        // new-construction premium, then house multiplier
        assert!((appraisal.median - 120_000.0 * 1.05 * 1.12).abs() < 1e-6);
    }

    #[test]
    fn test_value_after_tracks_running_value() {
        let appraisal = appraiser().appraise_with_price(&house_profile(), 1000.0);
        let last = appraisal.factors.last().unwrap();
        assert_eq!(last.value_after, appraisal.median);
        assert!((appraisal.factors[0].value_after - 126_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rooms_compound_without_clamp() {
        let profile = PropertyProfile {
            bedrooms: 0,
            bathrooms: 0,
            ..house_profile()
        };
        let appraisal = appraiser().appraise_with_price(&profile, 1000.0);

        assert!((appraisal.factors[1].multiplier - 0.76).abs() < 1e-9);
        assert!((appraisal.factors[2].multiplier - 0.70).abs() < 1e-9);
        assert!((appraisal.median - 120_000.0 * 1.05 * 0.76 * 0.70 * 1.12).abs() < 1e-6);
    }

    #[test]
    fn test_appraise_rejects_before_lookup() {
        let err = appraiser().appraise(&PropertyInput::default()).unwrap_err();
        assert!(matches!(err, EstimateError::Validation(ref e) if e.len() == 5));
    }

    #[test]
    fn test_appraise_unknown_zone() {
        let input = PropertyInput {
            district: "Miraflores".into(),
            zone: "Monterrico".into(),
            property_type: "casa".into(),
            covered_area: 100.0,
            bedrooms: 3,
            bathrooms: 2,
            ..Default::default()
        };

        assert_eq!(
            appraiser().appraise(&input).unwrap_err(),
            EstimateError::UnknownZone {
                district: "Miraflores".into(),
                zone: "Monterrico".into(),
            }
        );
    }
}
