use std::cmp::Ordering;

use serde::Deserialize;

use crate::document::FeatureFlag;

/// Rows per page in the flags table.
pub const PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagFilter {
    All,
    Enabled,
    Disabled,
    HasContext,
    NoContext,
}

impl Default for FlagFilter {
    fn default() -> Self {
        FlagFilter::All
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Value,
    Description,
}

impl Default for SortField {
    fn default() -> Self {
        SortField::Name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

/// One table view request: free-text search, a filter selector, a sort
/// field and direction, and a 1-indexed page.
#[derive(Debug, Clone)]
pub struct FlagQuery {
    pub search: String,
    pub filter: FlagFilter,
    pub sort_field: SortField,
    pub direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
}

impl Default for FlagQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: FlagFilter::All,
            sort_field: SortField::Name,
            direction: SortDirection::Asc,
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub items: Vec<FeatureFlag>,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Run the table pipeline over the flag list: search, then filter, then
/// sort, then paginate. Pure: the input sequence is never touched and
/// identical calls yield identical results.
pub fn query(flags: &[FeatureFlag], params: &FlagQuery) -> QueryResult {
    let mut result: Vec<&FeatureFlag> = flags.iter().collect();

    // Search: case-insensitive substring on name or description
    if !params.search.is_empty() {
        let needle = params.search.to_lowercase();
        result.retain(|f| {
            f.name.to_lowercase().contains(&needle)
                || f.description.to_lowercase().contains(&needle)
        });
    }

    match params.filter {
        FlagFilter::All => {}
        FlagFilter::Enabled => result.retain(|f| f.value),
        FlagFilter::Disabled => result.retain(|f| !f.value),
        FlagFilter::HasContext => result.retain(|f| f.has_context()),
        FlagFilter::NoContext => result.retain(|f| !f.has_context()),
    }

    // Stable sort in both directions: equal keys keep their input order
    result.sort_by(|a, b| {
        let ordering = match params.sort_field {
            SortField::Name => compare_strings(&a.name, &b.name),
            SortField::Value => a.value.cmp(&b.value),
            SortField::Description => compare_strings(&a.description, &b.description),
        };
        match params.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let total_count = result.len();
    let total_pages = total_count.div_ceil(params.page_size.max(1));

    // 1-indexed; page 0 and anything past the end yield an empty slice
    let items = if params.page == 0 {
        Vec::new()
    } else {
        result
            .into_iter()
            .skip((params.page - 1) * params.page_size)
            .take(params.page_size)
            .cloned()
            .collect()
    };

    QueryResult {
        items,
        total_count,
        total_pages,
    }
}

/// Case-insensitive ordering, standing in for the locale-aware collation
/// the table originally used.
fn compare_strings(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
