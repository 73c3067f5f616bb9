//! Property tests for the estimate range.

use std::sync::Arc;

use proptest::prelude::*;

use tasador::exchange::FixedRate;
use tasador::pricing::PriceTable;
use tasador::valuation::factors::BandFactors;
use tasador::valuation::range::band;
use tasador::valuation::{
    Appraiser, ConditionGrade, ElevatorSelection, EnergyGrade, PropertyProfile, PropertyType,
};

fn kind() -> impl Strategy<Value = Option<PropertyType>> {
    prop_oneof![
        Just(None),
        Just(Some(PropertyType::Apartment)),
        Just(Some(PropertyType::House)),
        Just(Some(PropertyType::Land)),
        Just(Some(PropertyType::Office)),
        Just(Some(PropertyType::Retail)),
    ]
}

fn elevator() -> impl Strategy<Value = ElevatorSelection> {
    prop_oneof![
        Just(ElevatorSelection::With),
        Just(ElevatorSelection::Without),
        Just(ElevatorSelection::Unset),
    ]
}

fn energy() -> impl Strategy<Value = Option<EnergyGrade>> {
    prop_oneof![
        Just(None),
        Just(Some(EnergyGrade::A)),
        Just(Some(EnergyGrade::C)),
        Just(Some(EnergyGrade::F)),
    ]
}

fn condition() -> impl Strategy<Value = Option<ConditionGrade>> {
    prop_oneof![
        Just(None),
        Just(Some(ConditionGrade::Excellent)),
        Just(Some(ConditionGrade::Regular)),
        Just(Some(ConditionGrade::NeedsRemodel)),
    ]
}

prop_compose! {
    /// Profiles that pass input validation.
    fn valid_profile()(
        kind in kind(),
        covered_area in 1.0f64..5_000.0,
        free_area in 0.0f64..5_000.0,
        bedrooms in 1i32..12,
        bathrooms in 1i32..10,
        floor in -3i32..60,
        elevator in elevator(),
        age_years in 0i32..1_000,
        energy in energy(),
        condition in condition(),
    ) -> PropertyProfile {
        PropertyProfile {
            kind,
            covered_area,
            free_area,
            bedrooms,
            bathrooms,
            floor,
            elevator,
            age_years,
            energy,
            condition,
        }
    }
}

proptest! {
    #[test]
    fn band_stays_within_bounds(profile in valid_profile()) {
        let b = band(&profile, &BandFactors::default());
        prop_assert!((0.08..=0.20).contains(&b), "band {} out of bounds", b);
    }

    #[test]
    fn range_is_ordered_and_symmetric(
        profile in valid_profile(),
        price in 100.0f64..20_000.0,
    ) {
        let appraiser = Appraiser::new(
            Arc::new(PriceTable::lima_2024()),
            Arc::new(FixedRate::default()),
        );
        let appraisal = appraiser.appraise_with_price(&profile, price);

        prop_assert!(appraisal.median > 0.0);
        prop_assert!(appraisal.low <= appraisal.median);
        prop_assert!(appraisal.median <= appraisal.high);

        let below = (appraisal.median - appraisal.low) / appraisal.median;
        let above = (appraisal.high - appraisal.median) / appraisal.median;
        prop_assert!((below - above).abs() < 1e-9);
        prop_assert!((below - appraisal.band).abs() < 1e-9);
    }
}

#[test]
fn extreme_age_hits_the_ceiling() {
    let profile = PropertyProfile {
        kind: Some(PropertyType::Land),
        covered_area: 100.0,
        free_area: 0.0,
        bedrooms: 1,
        bathrooms: 1,
        floor: 20,
        elevator: ElevatorSelection::Without,
        age_years: 1_000,
        energy: None,
        condition: None,
    };
    assert_eq!(band(&profile, &BandFactors::default()), 0.20);
}
