use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::products::models::Product;
use crate::shared::constants::{SIZES, WHATSAPP_BASE_URL};

/// Pre-filled WhatsApp chat for a product enquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WhatsAppInquiry {
    pub phone: String,
    pub message: String,
    pub url: String,
}

fn format_price(value: Decimal) -> String {
    if value.fract().is_zero() {
        value.trunc().normalize().to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// `₹120 - ₹150`, or a single price when the maximum is absent or equal
pub fn format_price_range(price_min: Decimal, price_max: Option<Decimal>, symbol: &str) -> String {
    match price_max {
        Some(max) if max != price_min => format!(
            "{symbol}{} - {symbol}{}",
            format_price(price_min),
            format_price(max)
        ),
        _ => format!("{symbol}{}", format_price(price_min)),
    }
}

/// Deduplicate sizes and put them in canonical S..XXXXL order.
///
/// Unknown sizes are kept after the canonical ones in input order.
pub fn sort_sizes(sizes: &[String]) -> Vec<String> {
    let rank = |s: &str| SIZES.iter().position(|c| *c == s).unwrap_or(SIZES.len());

    let mut unique: Vec<String> = Vec::with_capacity(sizes.len());
    for size in sizes {
        if !unique.contains(size) {
            unique.push(size.clone());
        }
    }
    unique.sort_by_key(|s| rank(s));
    unique
}

pub fn inquiry_message(product: &Product, currency_symbol: &str) -> String {
    let price = format_price_range(product.price_min, product.price_max, currency_symbol);

    format!(
        "Hi, I'm interested in:\n\n\
         *{}*\n\
         Category: {}\n\
         Price: {}\n\
         GSM: {}\n\
         Fabric: {}\n\
         Sizes: {}\n\
         Colors: {}\n\
         Min Order: {} pcs\n\n\
         Please share more details.",
        product.article_name,
        product.category,
        price,
        product.gsm,
        product.fabric_name,
        product.sizes.join(", "),
        product.colors.join(", "),
        product.min_order,
    )
}

pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        phone,
        urlencoding::encode(message)
    )
}

pub fn build_inquiry(product: &Product, phone: &str, currency_symbol: &str) -> WhatsAppInquiry {
    let message = inquiry_message(product, currency_symbol);
    WhatsAppInquiry {
        phone: phone.to_string(),
        url: whatsapp_link(phone, &message),
        message,
    }
}
