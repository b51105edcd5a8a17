//! Banner Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerView {
    pub id: String,
    pub name: String,
    pub photo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannerUpdate {
    pub name: Option<String>,
    pub photo: Option<String>,
}
