//! Free-text product search over an already loaded listing.

use crate::features::products::models::{Product, ProductWithImages};

/// Whether `product` matches an already trimmed, lowercased term.
///
/// The term is checked as a substring of the article name, fabric name,
/// category slug, each color and the description.
pub fn matches_term(product: &Product, term: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(term);

    contains(&product.article_name)
        || contains(&product.fabric_name)
        || contains(&product.category)
        || product.colors.iter().any(|c| contains(c))
        || product.description.as_deref().is_some_and(contains)
}

/// Filter `products` by a free-text query, preserving input order.
///
/// A blank query returns the input unchanged.
pub fn search_products(products: Vec<ProductWithImages>, query: &str) -> Vec<ProductWithImages> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return products;
    }

    products
        .into_iter()
        .filter(|p| matches_term(&p.product, &term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_product;

    fn catalog() -> Vec<ProductWithImages> {
        let mut polo = sample_product("Royal Polo", "collar");
        polo.product.fabric_name = "Pique Cotton".to_string();
        polo.product.colors = vec!["Navy".to_string(), "Maroon".to_string()];

        let mut tee = sample_product("Everyday Tee", "plain");
        tee.product.fabric_name = "Bio Wash".to_string();
        tee.product.description = Some("Soft combed cotton".to_string());

        let mut hoodie = sample_product("Winter Hoodie", "knitted");
        hoodie.product.fabric_name = "Fleece".to_string();
        hoodie.product.colors = vec!["Black".to_string()];

        vec![polo, tee, hoodie]
    }

    fn names(products: &[ProductWithImages]) -> Vec<&str> {
        products
            .iter()
            .map(|p| p.product.article_name.as_str())
            .collect()
    }

    #[test]
    fn test_blank_query_returns_input() {
        let products = catalog();
        assert_eq!(search_products(products.clone(), ""), products);
        assert_eq!(search_products(products.clone(), "   "), products);
    }

    #[test]
    fn test_matches_each_field() {
        assert_eq!(names(&search_products(catalog(), "polo")), ["Royal Polo"]);
        assert_eq!(names(&search_products(catalog(), "fleece")), ["Winter Hoodie"]);
        assert_eq!(names(&search_products(catalog(), "knitted")), ["Winter Hoodie"]);
        assert_eq!(names(&search_products(catalog(), "maroon")), ["Royal Polo"]);
        assert_eq!(names(&search_products(catalog(), "combed")), ["Everyday Tee"]);
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        assert_eq!(names(&search_products(catalog(), "  NAVY ")), ["Royal Polo"]);
    }

    #[test]
    fn test_preserves_order() {
        // "cotton" hits the polo's fabric and the tee's description
        assert_eq!(
            names(&search_products(catalog(), "cotton")),
            ["Royal Polo", "Everyday Tee"]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(search_products(catalog(), "denim").is_empty());
    }
}
