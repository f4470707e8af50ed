use crate::domain::models::product::Product;

/// Products below their ideal amount, i.e. what the household should buy.
pub fn shopping_list(products: Vec<Product>) -> Vec<Product> {
    products.into_iter().filter(Product::needs_ideal).collect()
}

/// Products at or below their recommended minimum (inclusive boundary).
pub fn low_stock(products: Vec<Product>) -> Vec<Product> {
    products.into_iter().filter(Product::is_low_stock).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, current: i64, min: i64, ideal: i64) -> Product {
        Product::new(name.into(), None, current, min, ideal, "u".into(), "h".into())
    }

    #[test]
    fn shopping_list_is_the_needs_ideal_filter() {
        let products = vec![
            product("rice", 2, 3, 5),
            product("salt", 5, 1, 5),
            product("oil", 4, 1, 5),
        ];
        let list = shopping_list(products);
        let names: Vec<_> = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["rice", "oil"]);
    }

    #[test]
    fn low_stock_includes_the_boundary_product() {
        // current == min sits on the low-stock side but not the
        // shopping-side of the min threshold.
        let products = vec![product("rice", 3, 3, 3)];
        assert_eq!(low_stock(products.clone()).len(), 1);
        assert!(shopping_list(products).is_empty());
    }
}
