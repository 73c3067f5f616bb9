//! Adjustment factor table.
//!
//! Every coefficient used by the valuation pipeline lives here. The table is
//! built once at startup (defaults, optionally overridden from a JSON file)
//! and shared read-only between requests.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tasador_common::error::ResultExt;
use tasador_common::util::read_json_file;

use super::types::{ConditionGrade, EnergyGrade, PropertyType};

/// Depreciation by age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeFactors {
    /// Depreciation per year of age
    pub annual_depreciation: f64,
    /// Cap on total depreciation
    pub max_depreciation: f64,
    /// Premium for new construction
    pub new_premium: f64,
    /// Highest age (inclusive) still counted as new
    pub new_max_age: i32,
}

impl Default for AgeFactors {
    fn default() -> Self {
        Self {
            annual_depreciation: 0.01,
            max_depreciation: 0.30,
            new_premium: 0.05,
            new_max_age: 1,
        }
    }
}

/// Increment/decrement around a base room count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomFactors {
    pub base: i32,
    /// Per room above base
    pub increment: f64,
    /// Cap on the total increment
    pub max_increment: f64,
    /// Per room below base (uncapped)
    pub decrement: f64,
}

impl RoomFactors {
    pub fn bedrooms() -> Self {
        Self {
            base: 2,
            increment: 0.08,
            max_increment: 0.25,
            decrement: 0.12,
        }
    }

    pub fn bathrooms() -> Self {
        Self {
            base: 2,
            increment: 0.06,
            max_increment: 0.18,
            decrement: 0.15,
        }
    }
}

/// Share of the free (uncovered) area counted in the weighted area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeAreaRatios {
    pub apartment: f64,
    pub house: f64,
    pub land: f64,
}

impl Default for FreeAreaRatios {
    fn default() -> Self {
        Self {
            apartment: 0.25,
            house: 0.40,
            land: 0.90,
        }
    }
}

impl FreeAreaRatios {
    /// Office, retail and unrecognized types use the apartment ratio.
    pub fn ratio(&self, kind: Option<PropertyType>) -> f64 {
        match kind {
            Some(PropertyType::House) => self.house,
            Some(PropertyType::Land) => self.land,
            _ => self.apartment,
        }
    }
}

/// Final multiplier per property type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeMultipliers {
    pub apartment: f64,
    pub house: f64,
    pub land: f64,
    pub office: f64,
    pub retail: f64,
}

impl Default for TypeMultipliers {
    fn default() -> Self {
        Self {
            apartment: 1.0,
            house: 1.12,
            land: 0.80,
            office: 0.95,
            retail: 0.85,
        }
    }
}

impl TypeMultipliers {
    pub fn multiplier(&self, kind: Option<PropertyType>) -> f64 {
        match kind {
            Some(PropertyType::Apartment) => self.apartment,
            Some(PropertyType::House) => self.house,
            Some(PropertyType::Land) => self.land,
            Some(PropertyType::Office) => self.office,
            Some(PropertyType::Retail) => self.retail,
            None => 1.0,
        }
    }
}

/// Multiplier per energy grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyFactors {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for EnergyFactors {
    fn default() -> Self {
        Self {
            a: 1.10,
            b: 1.05,
            c: 1.00,
            d: 0.95,
            e: 0.90,
            f: 0.85,
        }
    }
}

impl EnergyFactors {
    pub fn factor(&self, grade: Option<EnergyGrade>) -> f64 {
        match grade {
            Some(EnergyGrade::A) => self.a,
            Some(EnergyGrade::B) => self.b,
            Some(EnergyGrade::C) => self.c,
            Some(EnergyGrade::D) => self.d,
            Some(EnergyGrade::E) => self.e,
            Some(EnergyGrade::F) => self.f,
            None => 1.0,
        }
    }
}

/// Multiplier per state of conservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionFactors {
    pub excellent: f64,
    pub good: f64,
    pub regular: f64,
    pub needs_remodel: f64,
}

impl Default for ConditionFactors {
    fn default() -> Self {
        Self {
            excellent: 1.05,
            good: 1.00,
            regular: 0.90,
            needs_remodel: 0.75,
        }
    }
}

impl ConditionFactors {
    pub fn factor(&self, grade: Option<ConditionGrade>) -> f64 {
        match grade {
            Some(ConditionGrade::Excellent) => self.excellent,
            Some(ConditionGrade::Good) => self.good,
            Some(ConditionGrade::Regular) => self.regular,
            Some(ConditionGrade::NeedsRemodel) => self.needs_remodel,
            None => 1.0,
        }
    }
}

/// Multiplier per floor band (apartments only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorFactors {
    /// Floors 1-2
    pub low: f64,
    /// Floors 3-8
    pub mid: f64,
    /// Floors 9-15
    pub high: f64,
    /// Floors 16 and up
    pub top: f64,
}

impl Default for FloorFactors {
    fn default() -> Self {
        Self {
            low: 0.92,
            mid: 1.00,
            high: 0.96,
            top: 0.88,
        }
    }
}

/// Elevator premium and walk-up penalties (apartments only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorFactors {
    /// Premium for having an elevator
    pub premium: f64,
    /// Extra premium, compounded, from `high_floor_from` up
    pub high_floor_bonus: f64,
    pub high_floor_from: i32,
    /// Walk-up multiplier from `walkup_high_from` up
    pub walkup_high: f64,
    pub walkup_high_from: i32,
    /// Walk-up multiplier from `walkup_mid_from` up to below `walkup_high_from`
    pub walkup_mid: f64,
    pub walkup_mid_from: i32,
}

impl Default for ElevatorFactors {
    fn default() -> Self {
        Self {
            premium: 0.10,
            high_floor_bonus: 0.05,
            high_floor_from: 6,
            walkup_high: 0.70,
            walkup_high_from: 7,
            walkup_mid: 0.85,
            walkup_mid_from: 4,
        }
    }
}

/// Coefficients of the low/high range band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandFactors {
    pub base: f64,
    /// Added per `age_step_years` of age
    pub age_step: f64,
    pub age_step_years: f64,
    /// Cap on the age contribution
    pub age_max: f64,
    /// Added for walk-ups from `walkup_floor` up
    pub walkup_penalty: f64,
    pub walkup_floor: i32,
    /// Subtracted when an elevator is present
    pub elevator_credit: f64,
    /// Subtracted from `large_bedrooms` bedrooms up
    pub large_credit: f64,
    pub large_bedrooms: i32,
    /// Added for single-bedroom units
    pub single_bedroom_penalty: f64,
    /// Signed adjustments per type
    pub land_delta: f64,
    pub apartment_delta: f64,
    pub office_delta: f64,
    pub retail_delta: f64,
    /// Clamp bounds
    pub min: f64,
    pub max: f64,
}

impl Default for BandFactors {
    fn default() -> Self {
        Self {
            base: 0.10,
            age_step: 0.005,
            age_step_years: 5.0,
            age_max: 0.05,
            walkup_penalty: 0.05,
            walkup_floor: 7,
            elevator_credit: 0.02,
            large_credit: 0.02,
            large_bedrooms: 3,
            single_bedroom_penalty: 0.03,
            land_delta: 0.05,
            apartment_delta: -0.02,
            office_delta: 0.02,
            retail_delta: 0.03,
            min: 0.08,
            max: 0.20,
        }
    }
}

/// Complete factor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorConfig {
    pub age: AgeFactors,
    pub bedrooms: RoomFactors,
    pub bathrooms: RoomFactors,
    pub free_area: FreeAreaRatios,
    pub property_type: TypeMultipliers,
    pub energy: EnergyFactors,
    pub condition: ConditionFactors,
    pub floor: FloorFactors,
    pub elevator: ElevatorFactors,
    pub band: BandFactors,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self {
            age: AgeFactors::default(),
            bedrooms: RoomFactors::bedrooms(),
            bathrooms: RoomFactors::bathrooms(),
            free_area: FreeAreaRatios::default(),
            property_type: TypeMultipliers::default(),
            energy: EnergyFactors::default(),
            condition: ConditionFactors::default(),
            floor: FloorFactors::default(),
            elevator: ElevatorFactors::default(),
            band: BandFactors::default(),
        }
    }
}

impl FactorConfig {
    /// Load overrides from a JSON file; omitted sections and fields keep
    /// their defaults.
    pub fn load_from(path: &Path) -> tasador_common::Result<Self> {
        read_json_file(path).context("Failed to load factor table")
    }
}
