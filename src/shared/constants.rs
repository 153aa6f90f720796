// =============================================================================
// SETTINGS KEYS
// =============================================================================

pub const KEY_WHATSAPP_PRIMARY: &str = "whatsapp_primary";
pub const KEY_WHATSAPP_SECONDARY: &str = "whatsapp_secondary";
pub const KEY_BUSINESS_NAME: &str = "business_name";
pub const KEY_BUSINESS_ADDRESS: &str = "business_address";
pub const KEY_BUSINESS_EMAIL: &str = "business_email";
pub const KEY_CURRENCY_SYMBOL: &str = "currency_symbol";
pub const KEY_MIN_ORDER_DEFAULT: &str = "min_order_default";
pub const KEY_SEARCH_ENABLED: &str = "search_enabled";
pub const KEY_CATEGORY_SCROLLABLE: &str = "category_scrollable";
pub const KEY_STORE_MAP_URL: &str = "store_map_url";
pub const KEY_BUSINESS_HOURS: &str = "business_hours";
pub const KEY_STORE_LOCATION_NAME: &str = "store_location_name";
pub const KEY_GOOGLE_MAPS_EMBED_URL: &str = "google_maps_embed_url";

/// Settings key holding the JSON array of categories
pub const KEY_CATEGORIES: &str = "categories";

/// Settings key holding the JSON size chart object
pub const KEY_SIZE_CHART: &str = "size_chart";

// =============================================================================
// CATALOG CONSTANTS
// =============================================================================

/// Canonical size sequence, smallest first
pub const SIZES: [&str; 7] = ["S", "M", "L", "XL", "XXL", "XXXL", "XXXXL"];

/// Icon assets shipped with the storefront
pub const AVAILABLE_ICONS: [&str; 9] = [
    "plain.png",
    "printed.png",
    "embossed.png",
    "embroidered.png",
    "collar.png",
    "knitted.png",
    "silicon.png",
    "patch.png",
    "downshoulder.png",
];

/// Icon used when a category is created without one
pub const DEFAULT_ICON: &str = "plain.png";

/// Auto-generated slugs are cut to this many characters
pub const MAX_GENERATED_SLUG_LEN: usize = 20;

/// Minimum order used when the `min_order_default` setting is not a number
pub const FALLBACK_MIN_ORDER: i32 = 50;

/// Digits allowed after the decimal point in a price
pub const PRICE_SCALE: u32 = 2;

/// Prices must stay below this many whole units
pub const PRICE_LIMIT: i64 = 10_000_000_000;

/// Lowest GSM accepted for a product
pub const MIN_GSM: i32 = 100;

/// Base URL for WhatsApp click-to-chat links
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";
