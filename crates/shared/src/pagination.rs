use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u64 = 6;
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Page-number pagination arguments, taken from the query string.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageArgs {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageArgs {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

/// Paginated response envelope: total count plus links to the surrounding
/// pages, rendered as `{path}?page=N&limit=M`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: u64, results: Vec<T>, args: &PageArgs, path: &str) -> Self {
        let page = args.page();
        let limit = args.limit();
        let last_page = count.div_ceil(limit).max(1);

        let next = (page < last_page)
            .then(|| format!("{}?page={}&limit={}", path, page + 1, limit));
        let previous = (page > 1 && page <= last_page)
            .then(|| format!("{}?page={}&limit={}", path, page - 1, limit));

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}
