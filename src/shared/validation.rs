use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating category slugs
    /// Must be lowercase alphanumeric with single hyphens between segments
    /// - Valid: "plain", "poloshirts", "drop-shoulder", "v2"
    /// - Invalid: "-plain", "plain-", "drop--shoulder", "Plain", "drop_shoulder"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for WhatsApp numbers: digits only, country code included
    /// - Valid: "919599965931", "14155550123"
    /// - Invalid: "+919599965931", "95999 65931", "123"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9]{8,15}$").unwrap();
}
