//! Display-side helpers applied to an already-fetched page.
//!
//! These never talk to the server and are independent of the server-side
//! `search` parameter.

use super::Product;

/// Narrow a page to products whose name, description or category contains
/// `term` (case-insensitive). A blank term returns the whole page.
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.trim();
    if term.is_empty() {
        return products.iter().collect();
    }

    let term = term.to_lowercase();
    products
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&term)
                || product.description.to_lowercase().contains(&term)
                || product.category.to_lowercase().contains(&term)
        })
        .collect()
}

/// Number of products whose name contains any of `needles` (case-insensitive).
pub fn count_name_matches(products: &[Product], needles: &[&str]) -> usize {
    let needles: Vec<String> = needles.iter().map(|n| n.to_lowercase()).collect();
    products
        .iter()
        .filter(|product| {
            let name = product.name.to_lowercase();
            needles.iter().any(|needle| name.contains(needle.as_str()))
        })
        .count()
}
