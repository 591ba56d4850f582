use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::filter::Filter;
use crate::store::Document;

pub const PRODUCT_COLLECTION: &str = "product";
pub const CATEGORY_COLLECTION: &str = "category";

pub const DEFAULT_RATING: f64 = 4.2;
pub const DEFAULT_PRODUCT_LIMIT: i64 = 20;
pub const DEFAULT_CATEGORY_LIMIT: i64 = 50;

/// Fields searched by the product `q` parameter.
pub const SEARCH_FIELDS: [&str; 3] = ["title", "description", "tags"];

fn default_rating() -> Option<f64> {
    Some(DEFAULT_RATING)
}

fn default_in_stock() -> bool {
    true
}

fn default_product_limit() -> i64 {
    DEFAULT_PRODUCT_LIMIT
}

fn default_category_limit() -> i64 {
    DEFAULT_CATEGORY_LIMIT
}

/// Payload for creating a product. Stored as-is, defaults included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(rename = "Product")]
pub struct CreateProduct {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Free-form label; not checked against stored categories
    #[validate(length(min = 1))]
    pub category: String,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_rating")]
    #[validate(range(min = 0.0, max = 5.0))]
    #[schema(default = 4.2)]
    pub rating: Option<f64>,
    #[serde(default = "default_in_stock")]
    #[schema(default = true)]
    pub in_stock: bool,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Category {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Query parameters for `GET /products`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact, case-sensitive category match
    pub category: Option<String>,
    /// Case-insensitive text searched in title, description and tags
    pub q: Option<String>,
    /// Maximum number of items (default 20)
    #[serde(default = "default_product_limit")]
    #[validate(range(min = 1))]
    #[param(minimum = 1, default = 20)]
    pub limit: i64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            q: None,
            limit: DEFAULT_PRODUCT_LIMIT,
        }
    }
}

impl ProductQuery {
    /// Empty `category` or `q` counts as absent.
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::All;

        if let Some(category) = non_empty(&self.category) {
            filter = filter.and(Filter::eq("category", category));
        }

        if let Some(q) = non_empty(&self.q) {
            filter = filter.and(Filter::any_contains(&SEARCH_FIELDS, q));
        }

        filter
    }
}

/// Query parameters for `GET /categories`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    /// Maximum number of items (default 50)
    #[serde(default = "default_category_limit")]
    #[validate(range(min = 1))]
    #[param(minimum = 1, default = 50)]
    pub limit: i64,
}

impl Default for CategoryQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_CATEGORY_LIMIT,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// `{"items": [...]}` listing envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemsResponse {
    /// Stored documents with `id` in place of `_id`
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Document>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: String,
}

/// JSON Schemas of the writable entities, as served by `GET /schema`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SchemaResponse {
    #[schema(value_type = Object)]
    pub product: Value,
    #[schema(value_type = Object)]
    pub category: Value,
}

impl SchemaResponse {
    pub fn generate() -> Result<Self, serde_json::Error> {
        Ok(Self {
            product: serde_json::to_value(schema_for!(CreateProduct))?,
            category: serde_json::to_value(schema_for!(Category))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_product_defaults() {
        let product: CreateProduct = serde_json::from_value(json!({
            "title": "Trail Shoe",
            "price": 89.5,
            "category": "Shoes"
        }))
        .unwrap();

        assert_eq!(product.rating, Some(DEFAULT_RATING));
        assert!(product.in_stock);
        assert_eq!(product.description, None);
        assert_eq!(product.tags, None);
    }

    #[test]
    fn test_create_product_serializes_nulls() {
        let product = CreateProduct {
            title: "Cap".into(),
            description: None,
            price: 5.0,
            category: "Hats".into(),
            image: None,
            rating: Some(DEFAULT_RATING),
            in_stock: true,
            tags: None,
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["description"], Value::Null);
        assert_eq!(value["tags"], Value::Null);
        assert_eq!(value["rating"], json!(4.2));
    }

    #[test]
    fn test_explicit_null_rating_is_kept() {
        let product: CreateProduct = serde_json::from_value(json!({
            "title": "Cap", "price": 1, "category": "Hats", "rating": null
        }))
        .unwrap();
        assert_eq!(product.rating, None);
    }

    #[test]
    fn test_create_product_rejects_unknown_fields() {
        let result = serde_json::from_value::<CreateProduct>(json!({
            "title": "Cap", "price": 1, "category": "Hats", "colour": "red"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_product_validation() {
        let mut product: CreateProduct = serde_json::from_value(json!({
            "title": "Cap", "price": 1, "category": "Hats"
        }))
        .unwrap();
        assert!(product.validate().is_ok());

        product.price = -1.0;
        product.rating = Some(7.0);
        product.title = String::new();
        let errors = product.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("rating"));
        assert!(fields.contains_key("title"));
    }

    #[test]
    fn test_category_requires_name() {
        let result = serde_json::from_value::<Category>(json!({"description": "All shoes"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_product_query_filter() {
        assert!(ProductQuery::default().filter().is_all());

        let query = ProductQuery {
            category: Some("Shoes".into()),
            ..Default::default()
        };
        assert_eq!(query.filter(), Filter::eq("category", "Shoes"));

        let query = ProductQuery {
            category: Some("Shoes".into()),
            q: Some("trail".into()),
            limit: 5,
        };
        assert!(matches!(query.filter(), Filter::And(parts) if parts.len() == 2));
    }

    #[test]
    fn test_product_query_empty_strings_are_absent() {
        let query = ProductQuery {
            category: Some(String::new()),
            q: Some(String::new()),
            limit: 20,
        };
        assert!(query.filter().is_all());
    }

    #[test]
    fn test_query_limit_validation() {
        let query = CategoryQuery { limit: 0 };
        assert!(query.validate().is_err());
        assert!(CategoryQuery::default().validate().is_ok());
    }

    #[test]
    fn test_schema_response() {
        let schema = SchemaResponse::generate().unwrap();
        assert_eq!(schema.product["title"], "Product");
        assert_eq!(schema.category["title"], "Category");

        let required = schema.product["required"].as_array().unwrap();
        assert!(required.contains(&json!("title")));
        assert!(required.contains(&json!("price")));
        assert!(required.contains(&json!("category")));
        assert!(!required.contains(&json!("rating")));

        assert_eq!(schema.product["additionalProperties"], json!(false));
    }
}
