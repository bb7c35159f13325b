//! crates/sailing_log_core/src/pagination.rs
//!
//! Turns raw client-supplied page/limit/sort values into safe query state, and a
//! row count into navigation metadata. Malformed input never fails; it falls back
//! to defaults or gets clamped.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_SORT_FIELD: &str = "id";

/// Sort fields a client may request when listing boats.
pub const BOAT_SORT_FIELDS: &[&str] = &["id", "name", "lengthFt", "year", "createdAt"];

/// Sort fields a client may request when listing activities.
pub const ACTIVITY_SORT_FIELDS: &[&str] =
    &["id", "startTime", "endTime", "distanceNm", "createdAt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Validated paging and ordering for a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: i64,
    pub limit: i64,
    pub skip: i64,
    /// Always one of the allowed sort fields, or `"id"`.
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for PaginationParams {
    fn default() -> Self {
        parse_pagination_params(None, None, None, None, &[])
    }
}

/// Navigation metadata returned next to a page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

pub fn parse_pagination_params(
    raw_page: Option<&str>,
    raw_limit: Option<&str>,
    raw_sort_by: Option<&str>,
    raw_sort_order: Option<&str>,
    allowed_sort_fields: &[&str],
) -> PaginationParams {
    let page = parse_int(raw_page)
        .filter(|p| *p >= 1)
        .unwrap_or(DEFAULT_PAGE);
    let limit = parse_int(raw_limit)
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT);
    let skip = (page - 1).saturating_mul(limit);

    let sort_by = raw_sort_by
        .filter(|field| allowed_sort_fields.contains(field))
        .unwrap_or(DEFAULT_SORT_FIELD)
        .to_string();
    let sort_order = match raw_sort_order {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    PaginationParams {
        page,
        limit,
        skip,
        sort_by,
        sort_order,
    }
}

pub fn create_pagination_meta(page: i64, limit: i64, total: i64) -> PaginationMeta {
    let total_pages = if total <= 0 || limit <= 0 {
        0
    } else {
        (total + limit - 1) / limit
    };
    PaginationMeta {
        page,
        limit,
        total,
        total_pages,
        has_next_page: page < total_pages,
        has_prev_page: page > 1,
    }
}
