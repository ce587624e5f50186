use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: u64 = 6;
pub const MAX_PAGE_SIZE: u64 = 1000;

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Requested page window. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
pub struct Pagination {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        self.limit.saturating_mul(self.page.saturating_sub(1))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// A next page exists when a full next page fits, or when the overshoot
    /// of the next page boundary past `count` is smaller than one page.
    pub fn has_next(&self, count: u64) -> bool {
        let boundary = self.page.saturating_add(1).saturating_mul(self.limit);

        boundary <= count || boundary - count < self.limit
    }
}

/// Listing envelope: `{count, next, previous, results}`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Builds the envelope, deriving `next`/`previous` from `url` by
    /// substituting its `page` query pair.
    pub fn new(url: &Url, pagination: &Pagination, count: u64, results: Vec<T>) -> Self {
        if count == 0 {
            return Self::empty();
        }

        let next = pagination
            .has_next(count)
            .then(|| with_page(url, pagination.page + 1));

        let previous = pagination
            .has_previous()
            .then(|| with_page(url, pagination.page - 1));

        Self {
            count,
            next,
            previous,
            results,
        }
    }

    pub fn empty() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: vec![],
        }
    }
}

fn with_page(url: &Url, page: u64) -> String {
    let page = page.to_string();
    let mut replaced = false;
    let pairs = url
        .query_pairs()
        .map(|(key, value)| {
            if key == "page" {
                replaced = true;
                (key.into_owned(), page.to_owned())
            } else {
                (key.into_owned(), value.into_owned())
            }
        })
        .collect::<Vec<_>>();

    let mut url = url.clone();
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(pairs);
        if !replaced {
            query.append_pair("page", &page);
        }
    }

    url.to_string()
}
