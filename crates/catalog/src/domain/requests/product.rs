use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindAllProducts {
    #[serde(default)]
    #[validate(range(min = 0, message = "Page cannot be negative"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub size: i32,

    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
            sort_by: default_sort_by(),
            sort_dir: default_sort_dir(),
        }
    }
}

fn default_page_size() -> i32 {
    12
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_sort_dir() -> String {
    "asc".to_string()
}
