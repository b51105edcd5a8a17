//! Menu item record

use serde::{Deserialize, Serialize};
use shared::models::{MenuStatus, MenuView};

use super::document;
use crate::utils::money::format_rupiah;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub uid: String,
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
    pub status: MenuStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

document!(MenuItem, "menu");

impl From<MenuItem> for MenuView {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.uid,
            category_id: item.category_id,
            name: item.name,
            description: item.description,
            image: item.image,
            price: format_rupiah(item.price),
            status: item.status,
        }
    }
}
