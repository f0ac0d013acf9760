/// Pagination controls derived from the last successful page fetch.
/// Never mutated independently of a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    pub page_index: i32,
    pub page_size: i32,
    pub total_items: i64,
    pub sort_by: String,
    pub sort_dir: String,
}

impl PaginationState {
    pub fn total_pages(&self) -> i32 {
        if self.page_size <= 0 {
            return 0;
        }
        let size = i64::from(self.page_size);
        ((self.total_items + size - 1) / size) as i32
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages() - 1
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 12,
            total_items: 0,
            sort_by: "id".to_string(),
            sort_dir: "asc".to_string(),
        }
    }
}
