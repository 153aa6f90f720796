use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::DEFAULT_ICON;

/// A product category as persisted in the `categories` settings blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    pub order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_active() -> bool {
    true
}

/// Candidate for a new category; missing fields are derived on add
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

/// Partial change to an existing category
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

fn category(slug: &str, name: &str, description: &str, order: i32) -> Category {
    Category {
        slug: slug.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: format!("{}.png", slug),
        order,
        active: true,
    }
}

/// Categories used when nothing valid is persisted
pub fn default_categories() -> Vec<Category> {
    vec![
        category("plain", "Plain", "Solid color T-shirts", 1),
        category("printed", "Printed", "Printed designs", 2),
        category("embossed", "Embossed", "Embossed texture", 3),
        category("embroidered", "Embroidered", "Thread embroidery", 4),
        category("collar", "Collar/Polo", "Polo/collar T-shirts", 5),
        category("knitted", "Knitted", "Knitted fabric", 6),
        category("silicon", "Silicon", "Silicon print", 7),
        category("patch", "Patch", "Patch-applied designs", 8),
        category("downshoulder", "Drop Shoulder", "Drop shoulder style", 9),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::AVAILABLE_ICONS;

    #[test]
    fn test_default_categories_use_shipped_icons() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 9);
        for c in &defaults {
            assert!(AVAILABLE_ICONS.contains(&c.icon.as_str()), "{}", c.icon);
        }
    }

    #[test]
    fn test_deserialize_fills_optional_fields() {
        let c: Category = serde_json::from_str(r#"{"slug":"plain","name":"Plain","order":1}"#)
            .expect("valid category json");
        assert_eq!(c.icon, DEFAULT_ICON);
        assert_eq!(c.description, "");
        assert!(c.active);
    }
}
