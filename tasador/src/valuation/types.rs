//! Valuation Types.
//!
//! Request attributes, their normalized categories, and the estimate that
//! comes back out of the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::currency::Currency;

// ============================================================================
// Property Categories
// ============================================================================

/// Property category, resolved once from the free-text type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Departamento
    Apartment,
    /// Casa
    House,
    /// Terreno
    Land,
    /// Oficina
    Office,
    /// Local comercial
    Retail,
}

/// Label aliases per category, checked in this order: Spanish fragments
/// match anywhere in the label, English words only as whole words.
const TYPE_ALIASES: &[(PropertyType, &str, &str)] = &[
    (PropertyType::Apartment, "departamento", "apartment"),
    (PropertyType::House, "casa", "house"),
    (PropertyType::Land, "terreno", "land"),
    (PropertyType::Office, "oficina", "office"),
    (PropertyType::Retail, "local", "retail"),
];

impl PropertyType {
    /// Resolve a label case-insensitively ("Departamento", "casa de playa",
    /// "Local comercial", "office", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return None;
        }

        let has_word = |word: &str| {
            label
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == word)
        };

        TYPE_ALIASES
            .iter()
            .find(|(_, spanish, english)| label.contains(spanish) || has_word(english))
            .map(|(kind, _, _)| *kind)
    }

    /// Whether floor and elevator attributes affect the valuation.
    pub fn uses_floor(self) -> bool {
        matches!(self, Self::Apartment)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apartment => write!(f, "apartment"),
            Self::House => write!(f, "house"),
            Self::Land => write!(f, "land"),
            Self::Office => write!(f, "office"),
            Self::Retail => write!(f, "retail"),
        }
    }
}

/// Tri-state elevator selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum ElevatorSelection {
    /// "with" / "con"
    With,
    /// "without" / "sin"
    Without,
    /// Nothing selected
    #[default]
    Unset,
}

impl ElevatorSelection {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "with" | "con" => Self::With,
            "without" | "sin" => Self::Without,
            _ => Self::Unset,
        }
    }

    pub fn has_elevator(self) -> bool {
        self == Self::With
    }
}

impl From<Option<String>> for ElevatorSelection {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map_or(Self::Unset, Self::from_label)
    }
}

/// Energy efficiency grade, A (best) to F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyGrade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl EnergyGrade {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "F" => Some(Self::F),
            _ => None,
        }
    }
}

/// State of conservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionGrade {
    Excellent,
    Good,
    Regular,
    NeedsRemodel,
}

impl ConditionGrade {
    /// Accepts English and Spanish labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "excellent" | "excelente" => Some(Self::Excellent),
            "good" | "bueno" => Some(Self::Good),
            "regular" => Some(Self::Regular),
            "needs-remodel" | "needs_remodel" | "remodel" | "remodelar" => {
                Some(Self::NeedsRemodel)
            }
            _ => None,
        }
    }
}

// ============================================================================
// Input
// ============================================================================

/// Attributes of the property to appraise, as submitted.
///
/// Missing numeric fields deserialize to 0 so that validation reports them
/// rather than the payload being rejected outright.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyInput {
    pub district: String,
    /// Zone within `district`
    pub zone: String,
    /// Free-text type label ("Departamento", "house", ...)
    pub property_type: String,
    /// Covered (built) area in m²
    pub covered_area: f64,
    /// Uncovered area in m²
    pub free_area: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    /// Only meaningful for apartments
    pub floor: i32,
    pub elevator: ElevatorSelection,
    pub age_years: i32,
    /// "A" to "F"
    pub energy_grade: String,
    /// "excellent", "good", "regular", "needs-remodel"
    pub condition: String,
    pub currency: Currency,
}

impl PropertyInput {
    /// Check every rule and return all violations; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.district.trim().is_empty() || self.zone.trim().is_empty() {
            errors.push("District and zone are required".to_string());
        }
        if self.property_type.trim().is_empty() {
            errors.push("Property type is required".to_string());
        }
        // Written negated so NaN fails the check
        if !(self.covered_area > 0.0) {
            errors.push("Covered area must be greater than 0".to_string());
        } else if self.covered_area.is_infinite() {
            errors.push("Covered area must be a finite number".to_string());
        }
        if !(self.free_area >= 0.0) {
            errors.push("Free area cannot be negative".to_string());
        } else if self.free_area.is_infinite() {
            errors.push("Free area must be a finite number".to_string());
        }
        if self.bedrooms < 1 {
            errors.push("At least 1 bedroom is required".to_string());
        }
        if self.bathrooms < 1 {
            errors.push("At least 1 bathroom is required".to_string());
        }
        if self.age_years < 0 {
            errors.push("Age cannot be negative".to_string());
        }

        errors
    }

    /// Resolve labels into categories.
    pub fn profile(&self) -> PropertyProfile {
        PropertyProfile {
            kind: PropertyType::from_label(&self.property_type),
            covered_area: self.covered_area,
            free_area: self.free_area,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            floor: self.floor,
            elevator: self.elevator,
            age_years: self.age_years,
            energy: EnergyGrade::from_label(&self.energy_grade),
            condition: ConditionGrade::from_label(&self.condition),
        }
    }
}

/// Normalized view of a [`PropertyInput`] consumed by the adjustment
/// functions. `None` categories fall back to each factor's default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyProfile {
    pub kind: Option<PropertyType>,
    pub covered_area: f64,
    pub free_area: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub floor: i32,
    pub elevator: ElevatorSelection,
    pub age_years: i32,
    pub energy: Option<EnergyGrade>,
    pub condition: Option<ConditionGrade>,
}

// ============================================================================
// Output
// ============================================================================

/// One multiplier applied by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFactor {
    /// Stage name ("age", "bedrooms", ...)
    pub name: String,
    pub multiplier: f64,
    /// Running value after this stage (PEN)
    pub value_after: f64,
}

/// Appraisal in soles, before currency conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appraisal {
    pub price_per_sqm: f64,
    pub weighted_area: f64,
    /// price_per_sqm × weighted_area
    pub base_value: f64,
    /// Factors in application order
    pub factors: Vec<AppliedFactor>,
    /// Point estimate
    pub median: f64,
    /// Half-width of the range as a fraction of the median
    pub band: f64,
    pub low: f64,
    pub high: f64,
}

/// Formatted amounts, e.g. "852,720 S/".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedRange {
    pub low: String,
    pub median: String,
    pub high: String,
}

/// Final estimate in the requested currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResult {
    pub low: f64,
    pub median: f64,
    pub high: f64,
    pub currency: Currency,
    /// "S/" or "USD"
    pub currency_label: String,
    pub band: f64,
    /// PEN per USD, present only when converting to USD
    pub exchange_rate: Option<f64>,
    pub formatted: FormattedRange,
    /// "Estimate for <type> in <zone>, <district>"
    pub summary: String,
    /// PEN breakdown
    pub breakdown: Appraisal,
    pub estimated_at: DateTime<Utc>,
}
