use rust_decimal::Decimal;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

use models::{json_fields, product};

/// Catalog record as stored and served.
pub type Product = product::Model;

/// Optional list criteria. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        Self { category: category.map(str::to_owned), search: search.map(str::to_owned) }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// In-process match: exact category, case-insensitive name substring.
    ///
    /// The SQL path matches names with `LIKE`, whose case sensitivity depends
    /// on the column collation, so the two backends can disagree on case.
    pub fn matches(&self, p: &Product) -> bool {
        if let Some(category) = self.category() {
            if p.category != category {
                return false;
            }
        }
        if let Some(search) = self.search() {
            if !p.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Create input. Nothing is validated; only `description` has a default.
///
/// Fields are read leniently: numeric text is accepted for `price` and
/// `stock`, and a value of the wrong JSON type decodes as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewProduct {
    #[serde(default, deserialize_with = "json_fields::optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "json_fields::optional_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "json_fields::optional_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "json_fields::optional_i32")]
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "json_fields::optional_text")]
    pub description: Option<String>,
}

impl NewProduct {
    pub fn new(name: &str, price: Decimal, category: &str, stock: i32) -> Self {
        Self {
            name: Some(name.to_owned()),
            price: Some(price),
            category: Some(category.to_owned()),
            stock: Some(stock),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Description that gets persisted: absent means empty text.
    pub fn description_or_default(&self) -> String {
        self.description.clone().unwrap_or_default()
    }

    /// Record with the given id. Absent required fields become zero values.
    pub fn into_product(self, id: i64) -> Product {
        let description = self.description_or_default();
        Product {
            id,
            name: self.name.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            stock: self.stock.unwrap_or_default(),
            description: Some(description),
        }
    }

    /// Insert model with the id left to the database.
    ///
    /// Absent required fields stay `NotSet` so the column default or a
    /// NOT NULL rejection comes from the database itself.
    pub fn to_active_model(&self) -> product::ActiveModel {
        product::ActiveModel {
            id: ActiveValue::NotSet,
            name: set_or_unset(self.name.clone()),
            price: set_or_unset(self.price),
            category: set_or_unset(self.category.clone()),
            stock: set_or_unset(self.stock),
            description: ActiveValue::Set(Some(self.description_or_default())),
        }
    }
}

fn set_or_unset<V>(value: Option<V>) -> ActiveValue<V>
where
    V: Into<sea_orm::Value>,
{
    value.map_or(ActiveValue::NotSet, ActiveValue::Set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: &str) -> Product {
        NewProduct::new(name, Decimal::ONE, category, 1).into_product(1)
    }

    #[test]
    fn empty_filter_values_are_ignored() {
        let f = ProductFilter::new(Some(""), Some(""));
        assert_eq!(f.category(), None);
        assert_eq!(f.search(), None);
        assert!(f.matches(&product("Laptop", "Electronics")));
    }

    #[test]
    fn category_is_exact_and_case_sensitive() {
        let f = ProductFilter::new(Some("Electronics"), None);
        assert!(f.matches(&product("Laptop", "Electronics")));
        assert!(!f.matches(&product("Laptop", "electronics")));
        assert!(!f.matches(&product("Laptop", "Electronics & Co")));
    }

    #[test]
    fn search_ignores_case() {
        let f = ProductFilter::new(None, Some("LAP"));
        assert!(f.matches(&product("Laptop", "Electronics")));
        assert!(f.matches(&product("Overlap stand", "Office")));
        assert!(!f.matches(&product("Phone", "Electronics")));
    }

    #[test]
    fn both_criteria_must_hold() {
        let f = ProductFilter::new(Some("Books"), Some("lap"));
        assert!(!f.matches(&product("Laptop", "Electronics")));
        assert!(f.matches(&product("Laptop manual", "Books")));
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let p = NewProduct::new("Tablet", Decimal::new(29999, 2), "Electronics", 10).into_product(5);
        assert_eq!(p.description.as_deref(), Some(""));
        assert_eq!(p.id, 5);

        let p = NewProduct::new("Tablet", Decimal::new(29999, 2), "Electronics", 10)
            .with_description("10 inch")
            .into_product(6);
        assert_eq!(p.description.as_deref(), Some("10 inch"));
    }

    #[test]
    fn body_without_fields_deserializes() {
        let input: NewProduct = serde_json::from_str(r#"{"price": 5, "description": null}"#).expect("parse");
        assert_eq!(input.price, Some(Decimal::from(5)));
        assert_eq!(input.name, None);
        let p = input.into_product(9);
        assert_eq!(p.name, "");
        assert_eq!(p.stock, 0);
        assert_eq!(p.price, Decimal::ZERO);
        assert_eq!(p.description.as_deref(), Some(""));
    }

    #[test]
    fn numeric_text_is_coerced_like_numbers() {
        let input: NewProduct = serde_json::from_str(
            r#"{"name":"Tablet","price":"299.99","category":"Electronics","stock":"10"}"#,
        )
        .expect("parse");
        assert_eq!(input.price, Some(Decimal::new(29999, 2)));
        assert_eq!(input.stock, Some(10));
        let p = input.into_product(4);
        assert_eq!(p.price, Decimal::new(29999, 2));
        assert_eq!(p.stock, 10);
    }

    #[test]
    fn wrongly_typed_fields_are_treated_as_missing() {
        let input: NewProduct =
            serde_json::from_str(r#"{"name":"Tablet","price":"cheap","stock":true}"#).expect("parse");
        assert_eq!(input.name.as_deref(), Some("Tablet"));
        assert_eq!(input.price, None);
        assert_eq!(input.stock, None);
    }

    #[test]
    fn active_model_leaves_absent_columns_unset() {
        let input = NewProduct { price: Some(Decimal::new(25, 1)), ..NewProduct::default() };
        let am = input.to_active_model();
        assert!(matches!(am.id, ActiveValue::NotSet));
        assert!(matches!(am.name, ActiveValue::NotSet));
        assert!(matches!(am.price, ActiveValue::Set(p) if p == Decimal::new(25, 1)));
        assert!(matches!(am.description, ActiveValue::Set(Some(ref d)) if d.is_empty()));
    }
}
