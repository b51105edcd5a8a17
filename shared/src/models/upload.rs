//! Image upload result

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Public URL on the image host
    pub url: String,
    /// Path inside the image repository
    pub path: String,
}
