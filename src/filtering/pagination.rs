use axum::http::{HeaderValue, header::HeaderMap};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use super::sort::{SortOrder, parse_sort};

/// Page request: zero-based page index, optional page size and sort keys.
///
/// A `size` of `None` means a single unbounded page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pageable {
    pub page: u64,
    pub size: Option<u64>,
    pub sort: Vec<SortOrder>,
}

impl Pageable {
    /// Everything on one page, default sort.
    #[must_use]
    pub fn unpaged() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn of(page: u64, size: u64) -> Self {
        Self {
            page,
            size: Some(size),
            sort: Vec::new(),
        }
    }

    #[must_use]
    pub fn sorted_by(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Row offset of the first element of the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.size.map_or(0, |size| self.page.saturating_mul(size))
    }
}

/// Query-string form of [`Pageable`]: `?page=0&size=20&sort=name:desc,age`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index
    pub page: Option<u64>,
    /// Page size; omitted means unbounded
    pub size: Option<u64>,
    /// Comma-separated `field[:asc|desc]` keys
    pub sort: Option<String>,
}

impl From<PageParams> for Pageable {
    fn from(params: PageParams) -> Self {
        Self {
            page: params.page.unwrap_or(0),
            size: params.size,
            sort: params.sort.as_deref().map(parse_sort).unwrap_or_default(),
        }
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: Option<u64>,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(content: Vec<T>, page: u64, size: Option<u64>, total_elements: u64) -> Self {
        let total_pages = match size {
            Some(size) if size > 0 => total_elements.div_ceil(size),
            _ => u64::from(total_elements > 0),
        };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }

    /// Same page metadata over different content, e.g. after mapping entities to DTOs.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    /// `Content-Range` header describing this page.
    #[must_use]
    pub fn content_range(&self, resource_name: &str) -> HeaderMap {
        let offset = self.size.map_or(0, |size| self.page.saturating_mul(size));
        let limit = self.size.unwrap_or(self.total_elements);
        calculate_content_range(offset, limit, self.total_elements, resource_name)
    }
}

/// Sanitize resource name by removing control characters for HTTP headers
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Build a `Content-Range: <resource> <first>-<last>/<total>` header.
#[must_use]
pub fn calculate_content_range(
    offset: u64,
    limit: u64,
    total_count: u64,
    resource_name: &str,
) -> HeaderMap {
    let last = offset
        .saturating_add(limit.max(1))
        .saturating_sub(1)
        .min(total_count);
    let safe_name = sanitize_resource_name(resource_name);

    let mut headers = HeaderMap::new();
    let value: Result<HeaderValue, _> = format!("{safe_name} {offset}-{last}/{total_count}")
        .parse()
        .or_else(|_| format!("items {offset}-{last}/{total_count}").parse());
    if let Ok(value) = value {
        headers.insert("Content-Range", value);
    }
    headers
}
