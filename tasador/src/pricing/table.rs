//! In-memory price table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tasador_common::error::{Error, ResultExt};
use tasador_common::util::read_json_file;

use super::PriceLookup;

/// Prices for one district.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistrictPrices {
    /// Property types offered in this district ("Departamento", "Casa", ...)
    #[serde(default, rename = "type", alias = "property_types")]
    pub property_types: Vec<String>,
    /// Zone name -> price per m² (PEN)
    pub zones: BTreeMap<String, f64>,
}

/// District listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictSummary {
    pub name: String,
    pub property_types: Vec<String>,
    pub zone_count: usize,
}

/// Zone listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePrice {
    pub name: String,
    pub price_per_sqm: f64,
}

/// District -> zones -> price per m².
///
/// The JSON form is a map of district name to `{ "type": [...], "zones": {...} }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    districts: BTreeMap<String, DistrictPrices>,
}

/// Built-in dataset: Lima, August 2024.
const LIMA_2024: &[(&str, &[(&str, f64)])] = &[
    (
        "San Isidro",
        &[
            ("San Isidro Sur (Financiero)", 11781.0),
            ("San Isidro Centro", 10850.0),
            ("San Isidro Norte", 10200.0),
            ("El Golf", 11500.0),
            ("Country Club", 11200.0),
            ("Orrantia", 10800.0),
            ("Corpac", 9950.0),
        ],
    ),
    (
        "Miraflores",
        &[
            ("Malecon de Miraflores", 10800.0),
            ("Parque Kennedy", 10200.0),
            ("Reducto", 9800.0),
            ("San Antonio", 9500.0),
            ("Miraflores Alto", 9200.0),
            ("28 de Julio", 8900.0),
            ("Limite Barranco", 8700.0),
        ],
    ),
    (
        "Santiago de Surco",
        &[
            ("Monterrico", 7800.0),
            ("Chacarilla", 7400.0),
            ("Las Gardenias", 7200.0),
            ("Valle Hermoso", 7000.0),
            ("Surco Centro", 6800.0),
            ("Surco Viejo", 6400.0),
            ("Limite SJM", 5900.0),
        ],
    ),
];

const LIMA_PROPERTY_TYPES: &[&str] = &["Departamento", "Casa", "Terreno"];

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in Lima prices (August 2024).
    pub fn lima_2024() -> Self {
        let mut table = Self::new();
        for (district, zones) in LIMA_2024 {
            table.insert_district(
                *district,
                DistrictPrices {
                    property_types: LIMA_PROPERTY_TYPES.iter().map(|t| t.to_string()).collect(),
                    zones: zones
                        .iter()
                        .map(|(zone, price)| (zone.to_string(), *price))
                        .collect(),
                },
            );
        }
        table
    }

    /// Load a table from a JSON file.
    pub fn load_from(path: &Path) -> tasador_common::Result<Self> {
        let table: Self = read_json_file(path).context("Failed to load price table")?;

        if table.is_empty() {
            return Err(Error::InvalidInput(format!(
                "price table {} has no districts",
                path.display()
            )));
        }

        tracing::info!(
            path = %path.display(),
            districts = table.districts.len(),
            "Loaded price table"
        );
        Ok(table)
    }

    pub fn insert_district(&mut self, name: impl Into<String>, prices: DistrictPrices) {
        self.districts.insert(name.into(), prices);
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Districts in name order.
    pub fn districts(&self) -> Vec<DistrictSummary> {
        self.districts
            .iter()
            .map(|(name, prices)| DistrictSummary {
                name: name.clone(),
                property_types: prices.property_types.clone(),
                zone_count: prices.zones.len(),
            })
            .collect()
    }

    /// Zones of one district in name order; `None` for an unknown district.
    pub fn zones(&self, district: &str) -> Option<Vec<ZonePrice>> {
        self.districts.get(district).map(|prices| {
            prices
                .zones
                .iter()
                .map(|(name, price)| ZonePrice {
                    name: name.clone(),
                    price_per_sqm: *price,
                })
                .collect()
        })
    }
}

impl PriceLookup for PriceTable {
    /// Zero or negative prices count as missing.
    fn price_per_sqm(&self, district: &str, zone: &str) -> Option<f64> {
        self.districts
            .get(district)?
            .zones
            .get(zone)
            .copied()
            .filter(|price| *price > 0.0)
    }
}
