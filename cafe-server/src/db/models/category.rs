use serde::{Deserialize, Serialize};
use shared::models::CategoryView;

use super::document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub uid: String,
    pub name: String,
}

document!(Category, "category");

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.uid,
            name: category.name,
        }
    }
}
