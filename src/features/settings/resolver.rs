//! Turns the sparse key/value rows stored in `site_settings` into a complete
//! [`SiteSettings`]. This is the single place where malformed persisted state
//! is absorbed: nothing in here returns an error or panics.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;

use crate::features::categories::models::{default_categories, Category};
use crate::features::settings::models::{SiteSettings, SizeChart, SizeMeasurements};
use crate::shared::constants::{
    KEY_BUSINESS_ADDRESS, KEY_BUSINESS_EMAIL, KEY_BUSINESS_HOURS, KEY_BUSINESS_NAME,
    KEY_CATEGORIES, KEY_CATEGORY_SCROLLABLE, KEY_CURRENCY_SYMBOL, KEY_GOOGLE_MAPS_EMBED_URL,
    KEY_MIN_ORDER_DEFAULT, KEY_SEARCH_ENABLED, KEY_SIZE_CHART, KEY_STORE_LOCATION_NAME,
    KEY_STORE_MAP_URL, KEY_WHATSAPP_PRIMARY, KEY_WHATSAPP_SECONDARY,
};
use crate::shared::validation::SLUG_REGEX;

/// Feature toggles are stored as the strings "true"/"false"; anything else is off.
pub fn is_flag_enabled(value: &str) -> bool {
    value == "true"
}

/// Parse the `categories` blob. Falls back to the default list wholesale when
/// the blob is absent, is not a JSON array of categories, or breaks the
/// slug/name invariants. A valid list comes back sorted by `order`.
pub fn parse_categories(raw: Option<&str>) -> Vec<Category> {
    let Some(raw) = raw else {
        return default_categories();
    };

    let mut categories: Vec<Category> = match serde_json::from_str(raw) {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!("Stored categories are not valid JSON, using defaults: {}", e);
            return default_categories();
        }
    };

    let mut seen = HashSet::new();
    for category in &categories {
        if !SLUG_REGEX.is_match(&category.slug)
            || category.name.trim().is_empty()
            || !seen.insert(category.slug.as_str())
        {
            tracing::warn!(
                "Stored categories failed validation at slug '{}', using defaults",
                category.slug
            );
            return default_categories();
        }
    }

    categories.sort_by_key(|c| c.order);
    categories
}

#[derive(Debug, Deserialize)]
struct PartialMeasurements {
    chest: Option<String>,
    length: Option<String>,
    shoulder: Option<String>,
}

/// Parse the `size_chart` blob and merge it field by field over the default
/// chart, so rows added to the defaults later are not hidden by stale data.
pub fn parse_size_chart(raw: Option<&str>) -> SizeChart {
    let mut chart = SizeChart::default();
    let Some(raw) = raw else {
        return chart;
    };

    let parsed: BTreeMap<String, PartialMeasurements> = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored size chart is malformed, using defaults: {}", e);
            return chart;
        }
    };

    for (size, partial) in parsed {
        let row = chart.0.entry(size).or_insert_with(|| SizeMeasurements {
            chest: String::new(),
            length: String::new(),
            shoulder: String::new(),
        });
        if let Some(chest) = partial.chest {
            row.chest = chest;
        }
        if let Some(length) = partial.length {
            row.length = length;
        }
        if let Some(shoulder) = partial.shoulder {
            row.shoulder = shoulder;
        }
    }

    chart
}

/// Serialized form of the `categories` blob, as read back by [`parse_categories`]
pub fn encode_categories(categories: &[Category]) -> serde_json::Result<String> {
    serde_json::to_string(categories)
}

/// Serialized form of the `size_chart` blob, as read back by [`parse_size_chart`]
pub fn encode_size_chart(chart: &SizeChart) -> serde_json::Result<String> {
    serde_json::to_string(chart)
}

/// Build a complete configuration from whatever rows were stored
pub fn resolve(raw: &HashMap<String, String>) -> SiteSettings {
    let defaults = SiteSettings::default();
    let text = |key: &str, default: String| raw.get(key).cloned().unwrap_or(default);
    let toggle = |key: &str, default: bool| {
        raw.get(key)
            .map(|v| is_flag_enabled(v))
            .unwrap_or(default)
    };

    SiteSettings {
        whatsapp_primary: text(KEY_WHATSAPP_PRIMARY, defaults.whatsapp_primary),
        whatsapp_secondary: text(KEY_WHATSAPP_SECONDARY, defaults.whatsapp_secondary),
        business_name: text(KEY_BUSINESS_NAME, defaults.business_name),
        business_address: text(KEY_BUSINESS_ADDRESS, defaults.business_address),
        business_email: text(KEY_BUSINESS_EMAIL, defaults.business_email),
        currency_symbol: text(KEY_CURRENCY_SYMBOL, defaults.currency_symbol),
        min_order_default: text(KEY_MIN_ORDER_DEFAULT, defaults.min_order_default),
        search_enabled: toggle(KEY_SEARCH_ENABLED, defaults.search_enabled),
        category_scrollable: toggle(KEY_CATEGORY_SCROLLABLE, defaults.category_scrollable),
        store_map_url: text(KEY_STORE_MAP_URL, defaults.store_map_url),
        business_hours: text(KEY_BUSINESS_HOURS, defaults.business_hours),
        store_location_name: text(KEY_STORE_LOCATION_NAME, defaults.store_location_name),
        google_maps_embed_url: text(KEY_GOOGLE_MAPS_EMBED_URL, defaults.google_maps_embed_url),
        categories: parse_categories(raw.get(KEY_CATEGORIES).map(String::as_str)),
        size_chart: parse_size_chart(raw.get(KEY_SIZE_CHART).map(String::as_str)),
    }
}
