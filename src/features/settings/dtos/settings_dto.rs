use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::features::categories::models::Category;
use crate::features::settings::models::{SiteSettings, SizeChart};
use crate::shared::constants::{
    KEY_BUSINESS_ADDRESS, KEY_BUSINESS_EMAIL, KEY_BUSINESS_HOURS, KEY_BUSINESS_NAME,
    KEY_CATEGORY_SCROLLABLE, KEY_CURRENCY_SYMBOL, KEY_GOOGLE_MAPS_EMBED_URL,
    KEY_MIN_ORDER_DEFAULT, KEY_SEARCH_ENABLED, KEY_STORE_LOCATION_NAME, KEY_STORE_MAP_URL,
    KEY_WHATSAPP_PRIMARY, KEY_WHATSAPP_SECONDARY,
};
use crate::shared::validation::PHONE_REGEX;

fn validate_business_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("business_email must be an email".into()))
    }
}

fn validate_positive_number(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(ValidationError::new("positive_number")
            .with_message("min_order_default must be a positive whole number".into())),
    }
}

/// Partial update of the scalar site settings. Absent fields are left as is.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSettingsDto {
    #[validate(regex(path = *PHONE_REGEX, message = "WhatsApp number must be 8-15 digits including country code"))]
    pub whatsapp_primary: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "WhatsApp number must be 8-15 digits including country code"))]
    pub whatsapp_secondary: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub business_name: Option<String>,

    #[validate(length(max = 500))]
    pub business_address: Option<String>,

    #[validate(custom(function = "validate_business_email"))]
    pub business_email: Option<String>,

    #[validate(length(min = 1, max = 8))]
    pub currency_symbol: Option<String>,

    #[validate(custom(function = "validate_positive_number"))]
    pub min_order_default: Option<String>,

    pub search_enabled: Option<bool>,

    pub category_scrollable: Option<bool>,

    #[validate(length(max = 2000))]
    pub store_map_url: Option<String>,

    #[validate(length(max = 200))]
    pub business_hours: Option<String>,

    #[validate(length(max = 200))]
    pub store_location_name: Option<String>,

    #[validate(length(max = 2000))]
    pub google_maps_embed_url: Option<String>,
}

impl UpdateSettingsDto {
    /// Key/value pairs to persist, one per present field
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        let texts = [
            (KEY_WHATSAPP_PRIMARY, self.whatsapp_primary),
            (KEY_WHATSAPP_SECONDARY, self.whatsapp_secondary),
            (KEY_BUSINESS_NAME, self.business_name),
            (KEY_BUSINESS_ADDRESS, self.business_address),
            (KEY_BUSINESS_EMAIL, self.business_email),
            (KEY_CURRENCY_SYMBOL, self.currency_symbol),
            (KEY_MIN_ORDER_DEFAULT, self.min_order_default.map(|v| v.trim().to_string())),
            (KEY_STORE_MAP_URL, self.store_map_url),
            (KEY_BUSINESS_HOURS, self.business_hours),
            (KEY_STORE_LOCATION_NAME, self.store_location_name),
            (KEY_GOOGLE_MAPS_EMBED_URL, self.google_maps_embed_url),
        ];
        let flags = [
            (KEY_SEARCH_ENABLED, self.search_enabled),
            (KEY_CATEGORY_SCROLLABLE, self.category_scrollable),
        ];

        texts
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .chain(
                flags
                    .into_iter()
                    .filter_map(|(k, v)| v.map(|v| (k, v.to_string()))),
            )
            .collect()
    }
}

/// One line of the size chart table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SizeChartRowDto {
    pub size: String,
    pub chest: String,
    pub length: String,
    pub shoulder: String,
}

fn chart_rows(chart: &SizeChart) -> Vec<SizeChartRowDto> {
    chart
        .rows()
        .into_iter()
        .map(|(size, m)| SizeChartRowDto {
            size: size.to_string(),
            chest: m.chest.clone(),
            length: m.length.clone(),
            shoulder: m.shoulder.clone(),
        })
        .collect()
}

/// Storefront view of the settings: only active categories are exposed and
/// the size chart is flattened into rows in S..XXXXL order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicSettingsDto {
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
    pub size_chart: Vec<SizeChartRowDto>,
}

impl From<SiteSettings> for PublicSettingsDto {
    fn from(s: SiteSettings) -> Self {
        Self {
            whatsapp_primary: s.whatsapp_primary,
            whatsapp_secondary: s.whatsapp_secondary,
            business_name: s.business_name,
            business_address: s.business_address,
            business_email: s.business_email,
            currency_symbol: s.currency_symbol,
            min_order_default: s.min_order_default,
            search_enabled: s.search_enabled,
            category_scrollable: s.category_scrollable,
            store_map_url: s.store_map_url,
            business_hours: s.business_hours,
            store_location_name: s.store_location_name,
            google_maps_embed_url: s.google_maps_embed_url,
            size_chart: chart_rows(&s.size_chart),
            categories: s.categories.into_iter().filter(|c| c.active).collect(),
        }
    }
}
