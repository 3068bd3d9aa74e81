//! Page-based pagination for listing endpoints.
//!
//! Clients ask for a 1-based `page` of `size` items. [`Pageable`] normalizes
//! the raw query parameters, [`paginate`] fetches the window and total count
//! from a [`PagedCollection`], and [`PaginationResponse`] carries the data,
//! page metadata and navigation links back to the client.
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "data": [...],
//!   "page": { "currentPage": 3, "size": 10, "totalElements": 25, "totalPages": 3 },
//!   "links": {
//!     "self": "/api/v1/users/pages?page=3&size=10",
//!     "prev": "/api/v1/users/pages?page=2&size=10"
//!   }
//! }
//! ```
//!
//! Totals come from a full count of the collection on every request. That
//! cost grows with the collection and is a known scalability limit.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_SIZE: i64 = 10;

/// Deserializes an optional query value leniently: empty strings and values
/// that are not integers become `None` so defaults apply.
fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Raw pagination query parameters as sent by the client.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageableParams {
    /// Page number, 1-based (default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    #[param(value_type = Option<i64>)]
    pub page: Option<i64>,
    /// Items per page (default: 10)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    #[param(value_type = Option<i64>)]
    pub size: Option<i64>,
    /// Optional free-text query, echoed back in navigation links
    #[serde(default)]
    pub query: Option<String>,
}

/// Normalized pagination request. `page` and `size` are always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    pub page: i64,
    pub size: i64,
    pub query: Option<String>,
}

impl Pageable {
    pub fn new(page: Option<i64>, size: Option<i64>, query: Option<String>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
        let size = size.filter(|s| *s >= 1).unwrap_or(DEFAULT_SIZE);
        let query = query.filter(|q| !q.trim().is_empty());

        Self { page, size, query }
    }

    /// Builds a pageable from raw string values, as found in a query string.
    pub fn parse(page: Option<&str>, size: Option<&str>, query: Option<&str>) -> Self {
        let parse = |v: Option<&str>| v.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(parse(page), parse(size), query.map(str::to_string))
    }

    /// Zero-based number of items to skip.
    pub fn offset(&self) -> usize {
        usize::try_from((self.page - 1).saturating_mul(self.size)).unwrap_or(usize::MAX)
    }

    pub fn limit(&self) -> usize {
        usize::try_from(self.size).unwrap_or(usize::MAX)
    }
}

impl Default for Pageable {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

impl From<PageableParams> for Pageable {
    fn from(params: PageableParams) -> Self {
        Self::new(params.page, params.size, params.query)
    }
}

/// Page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl PageInfo {
    pub fn new(current_page: i64, size: i64, total_elements: i64) -> Self {
        let total_elements = total_elements.max(0);
        let per_page = size.max(1);
        let total_pages = total_elements / per_page + i64::from(total_elements % per_page != 0);

        Self {
            current_page,
            size,
            total_elements,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// Navigation links. `next` and `prev` are omitted when there is no such page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// The path and query of the current request, used to derive page links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkBase {
    path: String,
    params: Vec<(String, String)>,
}

impl LinkBase {
    pub fn new(path: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }

    /// Splits a request target such as `/users/pages?page=2&size=5`.
    pub fn from_path_and_query(path: &str, query: Option<&str>) -> Self {
        let params = query
            .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
            .unwrap_or_default();
        Self::new(path, params)
    }

    /// Link to `page`, keeping every other query parameter as sent.
    pub fn page_link(&self, page: i64) -> String {
        let page_value = page.to_string();
        let mut replaced = false;
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(self.params.len() + 1);

        for (key, value) in &self.params {
            if key == "page" {
                if !replaced {
                    params.push(("page", page_value.as_str()));
                    replaced = true;
                }
            } else {
                params.push((key.as_str(), value.as_str()));
            }
        }
        if !replaced {
            params.push(("page", page_value.as_str()));
        }

        match serde_urlencoded::to_string(&params) {
            Ok(query) if !query.is_empty() => format!("{}?{}", self.path, query),
            _ => self.path.clone(),
        }
    }

    pub fn links(&self, info: &PageInfo) -> PageLinks {
        PageLinks {
            self_link: self.page_link(info.current_page),
            next: info
                .has_next()
                .then(|| self.page_link(info.current_page + 1)),
            prev: info
                .has_prev()
                .then(|| self.page_link(info.current_page - 1)),
        }
    }
}

/// A page of results with metadata and navigation links.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationResponse<T> {
    pub data: Vec<T>,
    pub page: PageInfo,
    pub links: PageLinks,
}

impl<T> PaginationResponse<T> {
    pub fn new(data: Vec<T>, total_elements: i64, pageable: &Pageable, base: &LinkBase) -> Self {
        let page = PageInfo::new(pageable.page, pageable.size, total_elements);
        let links = base.links(&page);

        Self { data, page, links }
    }

    /// Swaps the data for a transformed version, keeping page and links.
    pub fn with_data<U>(self, data: Vec<U>) -> PaginationResponse<U> {
        PaginationResponse {
            data,
            page: self.page,
            links: self.links,
        }
    }

    pub fn map<U, F>(self, f: F) -> PaginationResponse<U>
    where
        F: FnMut(T) -> U,
    {
        let data = self.data.into_iter().map(f).collect();
        PaginationResponse {
            data,
            page: self.page,
            links: self.links,
        }
    }
}

/// An ordered collection that can be windowed and counted.
///
/// Implementations emulate windowing by skipping `offset` items of the
/// ordered sequence and collecting up to `limit`.
#[async_trait]
pub trait PagedCollection: Send + Sync {
    type Item: Send;
    type Error: Send;

    async fn window(&self, offset: usize, limit: usize) -> Result<Vec<Self::Item>, Self::Error>;

    async fn count_all(&self) -> Result<i64, Self::Error>;
}

/// Fetches one page from `source`.
pub async fn paginate<C>(
    source: &C,
    pageable: &Pageable,
    base: &LinkBase,
) -> Result<PaginationResponse<C::Item>, C::Error>
where
    C: PagedCollection + ?Sized,
{
    let data = source.window(pageable.offset(), pageable.limit()).await?;
    let total = source.count_all().await?;

    Ok(PaginationResponse::new(data, total, pageable, base))
}
