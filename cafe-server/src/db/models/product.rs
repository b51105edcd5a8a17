//! Retail product record (packaged goods sold next to the menu)

use serde::{Deserialize, Serialize};
use shared::models::ProductView;

use super::document;
use crate::utils::money::format_rupiah;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub photo: String,
}

fn default_available() -> bool {
    true
}

document!(Product, "product");

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.uid,
            name: product.name,
            description: product.description,
            price: format_rupiah(product.price),
            available: product.available,
            photo: product.photo,
        }
    }
}
