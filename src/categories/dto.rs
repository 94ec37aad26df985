use serde::Serialize;

use crate::categories::repo::Category;

/// Category as clients see it.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub color_hex: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            color_hex: category.color_hex,
        }
    }
}
