//! Pagination metadata carried in collection response headers.
//!
//! Qiita collection endpoints answer with two headers:
//!
//! ```text
//! Total-Count: 85414
//! Link: <https://qiita.com/api/v2/tags?page=1&per_page=2>; rel="first",
//!       <https://qiita.com/api/v2/tags?page=2&per_page=2>; rel="prev",
//!       <https://qiita.com/api/v2/tags?page=4&per_page=2>; rel="next",
//!       <https://qiita.com/api/v2/tags?page=100&per_page=2>; rel="last"
//! ```
//!
//! `parse_link_header` turns the `Link` value into `(rel, url)` entries and
//! `extract_pagination` folds both headers plus the requested page into a
//! `PaginationInfo`.

use std::ops::RangeInclusive;

use serde::Serialize;
use url::Url;

use crate::error::ApiError;

pub const TOTAL_COUNT_HEADER: &str = "Total-Count";
pub const LINK_HEADER: &str = "Link";

/// The page a caller asks a collection endpoint for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }
}

/// Documented bounds for `page` and `per_page`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBounds {
    pub page: RangeInclusive<u32>,
    pub per_page: RangeInclusive<u32>,
}

/// Bounds shared by every Qiita collection endpoint.
pub const QIITA_PAGE_BOUNDS: PageBounds = PageBounds {
    page: 1..=100,
    per_page: 1..=100,
};

impl PageBounds {
    /// Reject out-of-range parameters before any request is built.
    pub fn validate(&self, request: PageRequest) -> Result<(), ApiError> {
        check_range("page", request.page, &self.page)?;
        check_range("per_page", request.per_page, &self.per_page)
    }
}

fn check_range(
    name: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), ApiError> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(ApiError::InvalidParameter {
        name,
        min: *range.start(),
        max: *range.end(),
        value,
    })
}

/// Page position of one collection response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    per_page: u32,
    page: u32,
    first_page: u32,
    last_page: u32,
    total_count: u64,
}

impl PaginationInfo {
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn first_page(&self) -> u32 {
        self.first_page
    }

    pub fn last_page(&self) -> u32 {
        self.last_page
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }

    pub fn has_prev(&self) -> bool {
        self.page > self.first_page
    }
}

/// One `<url>; rel="..."` entry of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub rel: String,
    pub url: String,
}

/// Parse a `Link` header value into its entries, in header order.
///
/// An entry listing several relations (`rel="prev first"`) yields one
/// `LinkEntry` per relation. Entries without a `<url>` or a `rel` are
/// rejected.
pub fn parse_link_header(header: &str) -> Result<Vec<LinkEntry>, ApiError> {
    let mut entries = Vec::new();
    for part in header.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let mut segments = part.split(';').map(str::trim);
        let url = segments
            .next()
            .and_then(|target| target.strip_prefix('<'))
            .and_then(|target| target.strip_suffix('>'))
            .ok_or_else(|| {
                ApiError::MalformedPagination(format!("link entry '{part}' has no <url>"))
            })?;

        let rels = segments
            .filter_map(|param| param.strip_prefix("rel="))
            .next()
            .map(|rel| rel.trim_matches('"').trim_matches('\''))
            .ok_or_else(|| {
                ApiError::MalformedPagination(format!("link entry '{part}' has no rel"))
            })?;

        for rel in rels.split_whitespace() {
            entries.push(LinkEntry {
                rel: rel.to_ascii_lowercase(),
                url: url.to_string(),
            });
        }
    }
    Ok(entries)
}

/// Build the pagination info for a response to `request`.
///
/// Every `Link` header present is considered. Without a `last` relation the
/// collection fits on the requested page; without `first` the first page is 1.
/// A missing `Total-Count` reads as zero.
pub fn extract_pagination(
    headers: &[(String, String)],
    request: PageRequest,
) -> Result<PaginationInfo, ApiError> {
    let total_count = match crate::http::find_header(headers, TOTAL_COUNT_HEADER) {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            ApiError::MalformedPagination(format!(
                "{TOTAL_COUNT_HEADER} '{raw}' is not a non-negative integer"
            ))
        })?,
        None => 0,
    };

    let mut first_page = None;
    let mut last_page = None;
    let links = headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case(LINK_HEADER));
    for (_, value) in links {
        for entry in parse_link_header(value)? {
            match entry.rel.as_str() {
                "first" => first_page = Some(page_param(&entry)?),
                "last" => last_page = Some(page_param(&entry)?),
                _ => {}
            }
        }
    }

    Ok(PaginationInfo {
        per_page: request.per_page,
        page: request.page,
        first_page: first_page.unwrap_or(1),
        last_page: last_page.unwrap_or(request.page),
        total_count,
    })
}

fn page_param(entry: &LinkEntry) -> Result<u32, ApiError> {
    let malformed = || {
        ApiError::MalformedPagination(format!(
            "rel=\"{}\" url '{}' has no parseable page parameter",
            entry.rel, entry.url
        ))
    };
    let url = resolve(&entry.url).map_err(|_| malformed())?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .ok_or_else(malformed)
}

/// Link targets are normally absolute; relative ones are resolved against a
/// placeholder origin since only their query matters.
fn resolve(raw: &str) -> Result<Url, url::ParseError> {
    match Url::parse(raw) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")?.join(raw),
        other => other,
    }
}
