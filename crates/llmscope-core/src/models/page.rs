//! Page selection state

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current page (1-based) and a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl PageState {
    /// Create state positioned on the first page
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::validation("page size must be greater than zero"));
        }
        Ok(Self { page: 1, page_size })
    }

    /// Current 1-based page number
    pub fn page(&self) -> usize {
        self.page
    }

    /// Entries per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Move to `page`; zero is treated as the first page
    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Back to the first page
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Keep the page within `[1, total_pages]`
    pub fn clamp_to(&mut self, total_pages: usize) {
        self.page = self.page.min(total_pages).max(1);
    }
}
