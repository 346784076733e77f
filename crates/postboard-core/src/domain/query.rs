//! Filtering, sorting and pagination for post listings.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;

/// Stores take the row offset as a signed 64-bit integer.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Match criteria for a post listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub created_by: Option<Uuid>,
}

impl PostFilter {
    pub fn by_author(created_by: Uuid) -> Self {
        Self {
            created_by: Some(created_by),
        }
    }
}

/// Post fields a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortField {
    Id,
    CreatedBy,
    Text,
    CreatedAt,
    UpdatedAt,
}

impl PostSortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostSortField::Id => "id",
            PostSortField::CreatedBy => "createdBy",
            PostSortField::Text => "text",
            PostSortField::CreatedAt => "createdAt",
            PostSortField::UpdatedAt => "updatedAt",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One `field:direction` entry of a `sortBy` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: PostSortField,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortParseError {
    #[error("unknown sort field `{0}`")]
    UnknownField(String),
    #[error("unknown sort direction `{0}`, expected `asc` or `desc`")]
    UnknownDirection(String),
}

impl FromStr for SortKey {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field.trim(), Some(direction.trim())),
            None => (s.trim(), None),
        };

        let field = match field {
            "id" => PostSortField::Id,
            "createdBy" => PostSortField::CreatedBy,
            "text" => PostSortField::Text,
            "createdAt" => PostSortField::CreatedAt,
            "updatedAt" => PostSortField::UpdatedAt,
            other => return Err(SortParseError::UnknownField(other.to_string())),
        };

        let order = match direction {
            None | Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(other) => return Err(SortParseError::UnknownDirection(other.to_string())),
        };

        Ok(Self { field, order })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        write!(f, "{}:{}", self.field.as_str(), direction)
    }
}

/// Parse a comma-separated `sortBy` value, e.g. `createdAt:desc,text:asc`.
pub fn parse_sort_by(value: &str) -> Result<Vec<SortKey>, SortParseError> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Sorting and paging options for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    sort: Vec<SortKey>,
    limit: u64,
    page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            sort: Vec::new(),
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl PageRequest {
    /// Build a request; a limit or page below 1 falls back to its default.
    /// A page past [`PageRequest::max_page`] is clamped to it.
    pub fn new(sort: Vec<SortKey>, limit: Option<i64>, page: Option<i64>) -> Self {
        let positive = |v: Option<i64>, default: u64| match v {
            Some(v) if v > 0 => v as u64,
            _ => default,
        };
        let limit = positive(limit, DEFAULT_LIMIT);
        Self {
            sort,
            limit,
            page: positive(page, DEFAULT_PAGE).min(Self::max_page(limit)),
        }
    }

    /// Last page whose offset still fits in a signed 64-bit integer.
    pub fn max_page(limit: u64) -> u64 {
        MAX_OFFSET / limit.max(1) + 1
    }

    /// Sort keys, defaulting to ascending creation time.
    pub fn sort_keys(&self) -> Vec<SortKey> {
        if self.sort.is_empty() {
            vec![SortKey {
                field: PostSortField::CreatedAt,
                order: SortOrder::Asc,
            }]
        } else {
            self.sort.clone()
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// 1-based page index.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of a listing plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, request: &PageRequest, total_results: u64) -> Self {
        Self {
            results,
            page: request.page(),
            limit: request.limit(),
            total_pages: total_results.div_ceil(request.limit()),
            total_results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}
