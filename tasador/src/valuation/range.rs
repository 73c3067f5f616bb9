//! Range band around the point estimate.
//!
//! The band widens with age, walk-up height, single-bedroom units and
//! harder-to-price types, and narrows with an elevator, more bedrooms and
//! apartments. It is always clamped to `[min, max]`.

use super::factors::BandFactors;
use super::types::{ElevatorSelection, PropertyProfile, PropertyType};

/// Band as a fraction of the point estimate.
pub fn band(profile: &PropertyProfile, factors: &BandFactors) -> f64 {
    let mut band = factors.base;

    band += (f64::from(profile.age_years) / factors.age_step_years * factors.age_step)
        .min(factors.age_max);

    // An unset selector counts as neither
    match profile.elevator {
        ElevatorSelection::Without if profile.floor >= factors.walkup_floor => {
            band += factors.walkup_penalty;
        }
        ElevatorSelection::With => band -= factors.elevator_credit,
        _ => {}
    }

    if profile.bedrooms >= factors.large_bedrooms {
        band -= factors.large_credit;
    } else if profile.bedrooms == 1 {
        band += factors.single_bedroom_penalty;
    }

    band += match profile.kind {
        Some(PropertyType::Land) => factors.land_delta,
        Some(PropertyType::Apartment) => factors.apartment_delta,
        Some(PropertyType::Office) => factors.office_delta,
        Some(PropertyType::Retail) => factors.retail_delta,
        Some(PropertyType::House) | None => 0.0,
    };

    band.max(factors.min).min(factors.max)
}

/// Symmetric `(low, high)` bounds around `point`.
pub fn spread(point: f64, band: f64) -> (f64, f64) {
    (point * (1.0 - band), point * (1.0 + band))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> PropertyProfile {
        PropertyProfile {
            kind: Some(PropertyType::House),
            covered_area: 100.0,
            free_area: 0.0,
            bedrooms: 2,
            bathrooms: 2,
            floor: 0,
            elevator: ElevatorSelection::Unset,
            age_years: 0,
            energy: None,
            condition: None,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_base_band() {
        assert!(close(band(&profile(), &BandFactors::default()), 0.10));
    }

    #[test]
    fn test_age_contribution_is_capped() {
        let factors = BandFactors::default();
        let p = PropertyProfile { age_years: 20, ..profile() };
        assert!(close(band(&p, &factors), 0.12));

        let p = PropertyProfile { age_years: 1000, ..profile() };
        assert!(close(band(&p, &factors), 0.15));
    }

    #[test]
    fn test_walkup_penalty_needs_explicit_without() {
        let factors = BandFactors::default();
        let walkup = PropertyProfile {
            elevator: ElevatorSelection::Without,
            floor: 7,
            ..profile()
        };
        assert!(close(band(&walkup, &factors), 0.15));

        let unset = PropertyProfile { floor: 7, ..profile() };
        assert!(close(band(&unset, &factors), 0.10));

        let low_walkup = PropertyProfile { floor: 6, ..walkup };
        assert!(close(band(&low_walkup, &factors), 0.10));
    }

    #[test]
    fn test_groups_accumulate() {
        // land + single bedroom + walk-up + old
        let p = PropertyProfile {
            kind: Some(PropertyType::Land),
            bedrooms: 1,
            elevator: ElevatorSelection::Without,
            floor: 9,
            age_years: 10,
            ..profile()
        };
        // 0.10 + 0.01 + 0.05 + 0.03 + 0.05 = 0.24 -> 0.20
        assert!(close(band(&p, &BandFactors::default()), 0.20));
    }

    #[test]
    fn test_clamped_to_minimum() {
        let p = PropertyProfile {
            kind: Some(PropertyType::Apartment),
            bedrooms: 4,
            elevator: ElevatorSelection::With,
            ..profile()
        };
        // 0.10 - 0.02 - 0.02 - 0.02 = 0.04 -> 0.08
        assert!(close(band(&p, &BandFactors::default()), 0.08));
    }

    #[test]
    fn test_type_deltas() {
        let factors = BandFactors::default();
        for (kind, expected) in [
            (Some(PropertyType::Office), 0.12),
            (Some(PropertyType::Retail), 0.13),
            (Some(PropertyType::Apartment), 0.08),
            (None, 0.10),
        ] {
            let p = PropertyProfile { kind, ..profile() };
            assert!(close(band(&p, &factors), expected), "{kind:?}");
        }
    }

    #[test]
    fn test_spread_is_symmetric() {
        let (low, high) = spread(852_720.0, 0.08);
        assert!((low - 784_502.4).abs() < 1e-6);
        assert!((high - 920_937.6).abs() < 1e-6);
    }
}
