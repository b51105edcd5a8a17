//! Product Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Currency string
    pub price: String,
    pub available: bool,
    pub photo: String,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub photo: String,
}

fn default_true() -> bool {
    true
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub photo: Option<String>,
}
