use std::num::NonZeroU64;

use bson::Document;

use crate::application::validation::ValidatedParameters;
use crate::domain::value_objects::{SortField, SortOrder};

/// Largest page a client can request
pub const MAX_PAGE_SIZE: u64 = 10;

/// Page size when the client names none
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Resolved page window and ordering of one listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    page: u64,
    page_size: u64,
    skip: u64,
    sort_field: SortField,
    sort_order: SortOrder,
}

impl PageSpec {
    pub fn new(
        page: NonZeroU64,
        page_size: NonZeroU64,
        sort_field: SortField,
        sort_order: SortOrder,
    ) -> Self {
        let page = page.get();
        let page_size = page_size.get().min(MAX_PAGE_SIZE);
        Self {
            page,
            page_size,
            skip: (page - 1).saturating_mul(page_size),
            sort_field,
            sort_order,
        }
    }

    pub fn resolve(params: &ValidatedParameters) -> Self {
        Self::new(params.page, params.limit, params.sort_field, params.sort_order)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn skip(&self) -> u64 {
        self.skip
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// `{field: 1}` for ascending, `{field: -1}` for descending
    pub fn sort_document(&self) -> Document {
        let mut sort = Document::new();
        sort.insert(self.sort_field.field_name(), self.sort_order.as_direction());
        sort
    }

    pub fn total_pages(&self, total_records: u64) -> u64 {
        total_records.div_ceil(self.page_size)
    }
}
