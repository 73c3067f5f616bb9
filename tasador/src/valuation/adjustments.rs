//! Adjustment functions.
//!
//! Each function turns one attribute into a multiplier for the running
//! valuation. They are pure: same attribute and table, same multiplier.

use super::factors::{
    AgeFactors, ConditionFactors, ElevatorFactors, EnergyFactors, FactorConfig, FloorFactors,
    FreeAreaRatios, RoomFactors, TypeMultipliers,
};
use super::types::{ConditionGrade, EnergyGrade, PropertyType};

/// Covered area plus the type-dependent share of the free area.
pub fn weighted_area(
    covered_area: f64,
    free_area: f64,
    kind: Option<PropertyType>,
    ratios: &FreeAreaRatios,
) -> f64 {
    covered_area + free_area * ratios.ratio(kind)
}

/// New-construction premium up to `new_max_age`, linear capped
/// depreciation after that.
pub fn age_factor(age_years: i32, factors: &AgeFactors) -> f64 {
    if age_years <= factors.new_max_age {
        return 1.0 + factors.new_premium;
    }

    let depreciation =
        (f64::from(age_years) * factors.annual_depreciation).min(factors.max_depreciation);
    1.0 - depreciation
}

/// Bedroom or bathroom factor around the base count.
///
/// The decrement below base is not capped: with a large enough gap the
/// multiplier reaches zero or goes negative.
pub fn room_factor(count: i32, factors: &RoomFactors) -> f64 {
    if count > factors.base {
        let increment =
            (f64::from(count - factors.base) * factors.increment).min(factors.max_increment);
        1.0 + increment
    } else if count < factors.base {
        1.0 - f64::from(factors.base - count) * factors.decrement
    } else {
        1.0
    }
}

/// Floor band multiplier. Floors at or below 0 match no band.
pub fn floor_band_factor(floor: i32, factors: &FloorFactors) -> f64 {
    match floor {
        1..=2 => factors.low,
        3..=8 => factors.mid,
        9..=15 => factors.high,
        f if f >= 16 => factors.top,
        _ => 1.0,
    }
}

/// Elevator premium, or the walk-up penalty when there is none.
pub fn elevator_factor(floor: i32, has_elevator: bool, factors: &ElevatorFactors) -> f64 {
    if has_elevator {
        let mut factor = 1.0 + factors.premium;
        if floor >= factors.high_floor_from {
            factor *= 1.0 + factors.high_floor_bonus;
        }
        factor
    } else if floor >= factors.walkup_high_from {
        factors.walkup_high
    } else if floor >= factors.walkup_mid_from {
        factors.walkup_mid
    } else {
        1.0
    }
}

/// Combined floor/elevator multiplier; 1.0 for anything but apartments.
pub fn floor_factor(
    kind: Option<PropertyType>,
    floor: i32,
    has_elevator: bool,
    config: &FactorConfig,
) -> f64 {
    if !kind.is_some_and(PropertyType::uses_floor) {
        return 1.0;
    }

    floor_band_factor(floor, &config.floor) * elevator_factor(floor, has_elevator, &config.elevator)
}

pub fn energy_factor(grade: Option<EnergyGrade>, factors: &EnergyFactors) -> f64 {
    factors.factor(grade)
}

pub fn condition_factor(grade: Option<ConditionGrade>, factors: &ConditionFactors) -> f64 {
    factors.factor(grade)
}

pub fn type_factor(kind: Option<PropertyType>, multipliers: &TypeMultipliers) -> f64 {
    multipliers.multiplier(kind)
}
