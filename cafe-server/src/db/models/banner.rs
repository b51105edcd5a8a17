use serde::{Deserialize, Serialize};
use shared::models::BannerView;

use super::document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub uid: String,
    pub name: String,
    /// Image URL
    pub photo: String,
}

document!(Banner, "banner");

impl From<Banner> for BannerView {
    fn from(banner: Banner) -> Self {
        Self {
            id: banner.uid,
            name: banner.name,
            photo: banner.photo,
        }
    }
}
