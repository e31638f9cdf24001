//! Catalog listing rules: filter parsing, the sort allow-list and pagination.
//!
//! Query-string values arrive as raw strings so malformed numbers can be
//! rejected with a validation error instead of being silently coerced.
//! [`FilterSpec`] is the validated form handed to the repository layer.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of catalog entries per page.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Maximum number of catalog entries per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Highest page number honoured; larger values are clamped so the row
/// offset stays within `i64`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

// ---------------------------------------------------------------------------
// Price bounds
// ---------------------------------------------------------------------------

/// Decimal places a stored price may carry (`NUMERIC(10,2)`).
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound of a stored price (`NUMERIC(10,2)`).
pub const PRICE_LIMIT: i64 = 100_000_000;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sortable catalog columns. Anything outside this set is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Price,
    Name,
}

impl SortField {
    /// Parse the `sortBy` query value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim() {
            "created_at" => Ok(Self::CreatedAt),
            "price" => Ok(Self::Price),
            "name" => Ok(Self::Name),
            other => Err(CoreError::Validation(format!(
                "Invalid sortBy '{other}'. Must be one of: created_at, price, name"
            ))),
        }
    }

    /// The column reference used in `ORDER BY`.
    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "p.created_at",
            Self::Price => "p.price",
            Self::Name => "p.name",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse the `sortOrder` query value (case-insensitive).
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(CoreError::Validation(format!(
                "Invalid sortOrder '{}'. Must be 'asc' or 'desc'",
                value.trim()
            ))),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Raw query parameters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /products`, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub featured: Option<String>,
}

// ---------------------------------------------------------------------------
// Validated filter
// ---------------------------------------------------------------------------

/// A validated catalog query. All present filters combine with AND; the
/// `active` status constraint is applied by the repository and is not part
/// of this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub featured_only: bool,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            min_price: None,
            max_price: None,
            featured_only: false,
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterSpec {
    /// Validate raw query parameters.
    ///
    /// Blank text filters count as absent. `page` is clamped to
    /// `1..=MAX_PAGE` and `limit` to `1..=MAX_PAGE_SIZE`.
    pub fn from_params(params: &CatalogParams) -> Result<Self, CoreError> {
        let page = parse_integer("page", params.page.as_deref())?
            .unwrap_or(1)
            .clamp(1, MAX_PAGE);
        let limit = parse_integer("limit", params.limit.as_deref())?
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let min_price = parse_price("minPrice", params.min_price.as_deref())?;
        let max_price = parse_price("maxPrice", params.max_price.as_deref())?;
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(CoreError::Validation(
                    "minPrice must not be greater than maxPrice".into(),
                ));
            }
        }

        let sort_field = match non_blank(params.sort_by.as_deref()) {
            Some(v) => SortField::parse(v)?,
            None => SortField::default(),
        };
        let sort_order = match non_blank(params.sort_order.as_deref()) {
            Some(v) => SortOrder::parse(v)?,
            None => SortOrder::default(),
        };

        Ok(Self {
            search: non_blank(params.search.as_deref()).map(str::to_string),
            category: non_blank(params.category.as_deref()).map(str::to_string),
            min_price,
            max_price,
            featured_only: params.featured.as_deref() == Some("true"),
            sort_field,
            sort_order,
            page,
            limit,
        })
    }

    /// Row offset for the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ILIKE` pattern for the free-text search, wildcards escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        }
    }
}

/// `ceil(total / limit)`; zero when there are no matches.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Escape `\`, `%` and `_` so user input matches literally inside `LIKE`.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_integer(name: &str, value: Option<&str>) -> Result<Option<i64>, CoreError> {
    match non_blank(value) {
        None => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("{name} must be an integer, got '{v}'"))),
    }
}

/// Parse a non-negative decimal price. Shared with the admin product form.
///
/// Values must fit the price column: at most [`PRICE_SCALE`] decimal places
/// and below [`PRICE_LIMIT`].
pub fn parse_price(name: &str, value: Option<&str>) -> Result<Option<Decimal>, CoreError> {
    let Some(v) = non_blank(value) else {
        return Ok(None);
    };
    let price = Decimal::from_str(v)
        .map_err(|_| CoreError::Validation(format!("{name} must be a number, got '{v}'")))?;
    if price.is_sign_negative() {
        return Err(CoreError::Validation(format!("{name} must not be negative")));
    }
    let price = price.normalize();
    if price.scale() > PRICE_SCALE {
        return Err(CoreError::Validation(format!(
            "{name} must have at most {PRICE_SCALE} decimal places"
        )));
    }
    if price >= Decimal::from(PRICE_LIMIT) {
        return Err(CoreError::Validation(format!(
            "{name} must be less than {PRICE_LIMIT}"
        )));
    }
    Ok(Some(price))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
