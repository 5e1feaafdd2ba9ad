use serde::Deserialize;

use warehouse_inventory::ArticleRequirement;
use warehouse_products::{AddProduct, ProductName};
use warehouse_sales::OrderLine;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddArticleRequest {
    pub name: String,
    pub stock: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub name: String,
    pub article_quantities: Vec<ArticleRequirement>,
    #[serde(default)]
    pub price: f64,
    pub stock: u64,
}

impl From<AddProductRequest> for AddProduct {
    fn from(body: AddProductRequest) -> Self {
        AddProduct {
            name: ProductName::from(body.name),
            requirements: body.article_quantities,
            price: body.price,
            stock_to_add: body.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyProductRequest {
    pub required_product_list: Vec<OrderLine>,
}

// -------------------------
// Response messages
// -------------------------

pub const PRODUCT_ADDED: &str = "Product added successfully";
pub const PRODUCT_NOT_ADDED: &str = "Not enough stock to add product";
pub const ORDER_SUCCESSFUL: &str = "Order successful";
pub const ORDER_OUT_OF_STOCK: &str = "Item Out of Stock";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_product_body_uses_camel_case_and_document_requirement_fields() {
        let body: AddProductRequest = serde_json::from_str(
            r#"{"name":"chair","articleQuantities":[{"art_id":"1","amount_of":4}],"price":50,"stock":2}"#,
        )
        .unwrap();
        let request = AddProduct::from(body);
        assert_eq!(request.name.as_str(), "chair");
        assert_eq!(request.requirements, vec![ArticleRequirement::new("1", 4)]);
        assert_eq!(request.price, 50.0);
        assert_eq!(request.stock_to_add, 2);
    }

    #[test]
    fn buy_body_reads_required_product_list() {
        let body: BuyProductRequest = serde_json::from_str(
            r#"{"requiredProductList":[{"name":"Dining Chair","quantity":1}]}"#,
        )
        .unwrap();
        assert_eq!(body.required_product_list, vec![OrderLine::new("Dining Chair", 1)]);
    }

    #[test]
    fn negative_stock_is_not_accepted() {
        let res = serde_json::from_str::<AddArticleRequest>(r#"{"name":"leg","stock":-3}"#);
        assert!(res.is_err());
    }
}
