//! Menu Model

use serde::{Deserialize, Serialize};

/// Availability of a menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuStatus {
    #[serde(rename = "Tersedia")]
    Tersedia,
    #[serde(rename = "Tidak Tersedia")]
    TidakTersedia,
}

impl MenuStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Tersedia" => Some(Self::Tersedia),
            "Tidak Tersedia" => Some(Self::TidakTersedia),
            _ => None,
        }
    }
}

/// API projection of a menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuView {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Currency string, e.g. `Rp 18000.00`
    pub price: String,
    pub status: MenuStatus,
}

/// Update menu payload
///
/// Empty strings count as absent. `price` accepts a number or a price string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuUpdate {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<serde_json::Value>,
    pub status: Option<String>,
}
