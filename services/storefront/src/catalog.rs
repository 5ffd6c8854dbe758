//! Catalog browsing helpers over a fetched product list

use common::product::{Product, ProductId};

/// Listing filter: category AND free-text query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// `None` shows every category
    pub category: Option<String>,
    /// Case-insensitive substring of title or description
    pub query: String,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let in_category = self
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);

        let query = self.query.trim().to_lowercase();
        let in_query = query.is_empty()
            || product.title.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query);

        in_category && in_query
    }

    /// Matching products, in listing order
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .collect()
    }
}

/// Distinct categories in first-seen order
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for product in products {
        if !categories.contains(&product.category.as_str()) {
            categories.push(&product.category);
        }
    }
    categories
}

pub fn find(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|product| product.id == id)
}
