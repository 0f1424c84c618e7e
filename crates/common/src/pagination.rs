//! Pagination utilities shared by the service and HTTP layers.

/// Pagination parameters for list endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

fn default_per_page() -> u32 { 20 }

impl Pagination {
    /// Clamp to sane defaults and convert to a zero-based page index and page size.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: default_per_page() } }
}
