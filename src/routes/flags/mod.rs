pub mod routes;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::{ContextRule, Environment, FeatureFlag};
use crate::evaluation::EvaluationContext;
use crate::query::{FlagFilter, FlagQuery, SortDirection, SortField, PAGE_SIZE};

// MODELS

/// Table view parameters, straight from the query string. Everything is
/// optional; an omitted `page` means page 1, so a client that changes
/// the filter and drops the page parameter lands back on the first page.
#[derive(Debug, Deserialize)]
pub struct ListFlagsParams {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filter: FlagFilter,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

impl ListFlagsParams {
    pub fn to_query(&self) -> FlagQuery {
        FlagQuery {
            search: self.search.clone(),
            filter: self.filter,
            sort_field: self.sort,
            direction: self.direction,
            page: self.page,
            page_size: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlagResponse {
    pub name: String,
    pub value: bool,
    pub description: String,
    pub context_rules: Vec<ContextRule>,
}

impl From<FeatureFlag> for FlagResponse {
    fn from(flag: FeatureFlag) -> Self {
        Self {
            name: flag.name,
            value: flag.value,
            description: flag.description,
            context_rules: flag.context_rules,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlagListResponse {
    pub environment: Environment,
    pub items: Vec<FlagResponse>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Default)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub context: Option<EvaluationContext>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub environment: Environment,
    pub flags: HashMap<String, bool>,
}

#[derive(Debug, Serialize)]
pub struct FlagEvaluationResponse {
    pub name: String,
    pub enabled: bool,
}
