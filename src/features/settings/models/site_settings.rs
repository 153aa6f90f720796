use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::models::{default_categories, Category};
use crate::shared::constants::{FALLBACK_MIN_ORDER, SIZES};

/// Measurements for one garment size, in inches (e.g. `36"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SizeMeasurements {
    pub chest: String,
    pub length: String,
    pub shoulder: String,
}

impl SizeMeasurements {
    fn new(chest: &str, length: &str, shoulder: &str) -> Self {
        Self {
            chest: chest.to_string(),
            length: length.to_string(),
            shoulder: shoulder.to_string(),
        }
    }
}

/// Size label -> measurements. Serialized as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SizeChart(pub BTreeMap<String, SizeMeasurements>);

impl SizeChart {
    /// Rows in canonical size order; sizes outside the canonical list follow
    /// alphabetically.
    pub fn rows(&self) -> Vec<(&str, &SizeMeasurements)> {
        let mut rows: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), v)).collect();
        rows.sort_by_key(|(size, _)| {
            (
                SIZES.iter().position(|s| s == size).unwrap_or(SIZES.len()),
                *size,
            )
        });
        rows
    }
}

impl Default for SizeChart {
    fn default() -> Self {
        let rows = [
            ("S", SizeMeasurements::new("36\"", "26\"", "16\"")),
            ("M", SizeMeasurements::new("38\"", "27\"", "17\"")),
            ("L", SizeMeasurements::new("40\"", "28\"", "18\"")),
            ("XL", SizeMeasurements::new("42\"", "29\"", "19\"")),
            ("XXL", SizeMeasurements::new("44\"", "30\"", "20\"")),
            ("XXXL", SizeMeasurements::new("46\"", "31\"", "21\"")),
        ];
        Self(
            rows.into_iter()
                .map(|(size, m)| (size.to_string(), m))
                .collect(),
        )
    }
}

/// Fully populated site configuration. Always complete: anything missing or
/// malformed in storage has already been replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SiteSettings {
    pub whatsapp_primary: String,
    pub whatsapp_secondary: String,
    pub business_name: String,
    pub business_address: String,
    pub business_email: String,
    pub currency_symbol: String,
    pub min_order_default: String,
    pub search_enabled: bool,
    pub category_scrollable: bool,
    pub store_map_url: String,
    pub business_hours: String,
    pub store_location_name: String,
    pub google_maps_embed_url: String,
    pub categories: Vec<Category>,
    pub size_chart: SizeChart,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            whatsapp_primary: "919599965931".to_string(),
            whatsapp_secondary: "919582142143".to_string(),
            business_name: "Tom White".to_string(),
            business_address:
                "H-16/86 Gali No 4, Tank Road, Near Bhalle Wale, Karol Bagh, New Delhi - 110005"
                    .to_string(),
            business_email: String::new(),
            currency_symbol: "\u{20b9}".to_string(),
            min_order_default: FALLBACK_MIN_ORDER.to_string(),
            search_enabled: false,
            category_scrollable: false,
            store_map_url: String::new(),
            business_hours: String::new(),
            store_location_name: String::new(),
            google_maps_embed_url: String::new(),
            categories: default_categories(),
            size_chart: SizeChart::default(),
        }
    }
}

impl SiteSettings {
    /// Minimum order as a number, falling back when the stored text is not one
    pub fn min_order(&self) -> i32 {
        self.min_order_default
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(FALLBACK_MIN_ORDER)
    }
}
