/// Which of the catalog's three data sources currently governs the
/// displayed collection. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Paginated,
    CategoryFiltered(String),
    Searched(String),
}

impl ViewMode {
    pub fn is_paginated(&self) -> bool {
        matches!(self, ViewMode::Paginated)
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Paginated
    }
}
