//! Filter engine.
//!
//! # Responsibility
//! - Derive the visible lead view from the store, category filters and a
//!   single-column free-text search.
//! - Hide leads that already live in the moved/assigned collection.
//!
//! # Invariants
//! - Output is an order-preserving subset of the store; the store is never
//!   mutated.
//! - Category filters apply only to columns with more than one distinct value;
//!   a filter with no selected values is inactive on any column.
//! - Search is a literal, case-insensitive substring match; only the empty
//!   term matches everything.

use crate::model::lead::{parse_lead_field, Lead, LeadField, LeadId, UnknownLeadField};
use crate::model::moved::MovedCollection;
use crate::model::store::LeadStore;
use regex::{Regex, RegexBuilder};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Placeholder text shown instead of an empty lead table.
pub const NO_LEADS_MESSAGE: &str = "No leads to display based on current filters or data.";

/// Filter construction/evaluation errors. These indicate caller bugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    UnknownColumn(String),
    ColumnNotFilterable(LeadField),
    InvalidSearchTerm { term: String, message: String },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownColumn(column) => write!(f, "unknown lead column: `{column}`"),
            Self::ColumnNotFilterable(field) => {
                write!(f, "column `{field}` has a single value and cannot be filtered")
            }
            Self::InvalidSearchTerm { term, message } => {
                write!(f, "search term `{term}` cannot be matched: {message}")
            }
        }
    }
}

impl Error for FilterError {}

impl From<UnknownLeadField> for FilterError {
    fn from(value: UnknownLeadField) -> Self {
        Self::UnknownColumn(value.0)
    }
}

/// Membership filter on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub field: LeadField,
    /// Accepted values; empty means the filter is inactive.
    pub values: Vec<String>,
}

/// Free-text search on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub field: LeadField,
    pub term: String,
}

/// Complete filter state of the lead table.
///
/// Category filters are ANDed in order, then search is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub categories: Vec<CategoryFilter>,
    pub search: Option<SearchFilter>,
}

impl FilterQuery {
    /// Unfiltered query (moved leads are still hidden).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from raw column names as submitted by a form.
    ///
    /// # Errors
    /// - `FilterError::UnknownColumn` when a column name is not a lead field.
    pub fn from_parts(
        active_category: Option<&str>,
        selected_values: &[String],
        search_term: Option<&str>,
        search_column: Option<&str>,
    ) -> Result<Self, FilterError> {
        let mut query = Self::new();
        if let Some(column) = active_category {
            query = query.with_category(parse_lead_field(column)?, selected_values.to_vec());
        }
        if let (Some(term), Some(column)) = (search_term, search_column) {
            query = query.with_search(parse_lead_field(column)?, term);
        }
        Ok(query)
    }

    pub fn with_category<I, S>(mut self, field: LeadField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.push(CategoryFilter {
            field,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_search(mut self, field: LeadField, term: impl Into<String>) -> Self {
        self.search = Some(SearchFilter {
            field,
            term: term.into(),
        });
        self
    }
}

/// Ordered view over the store produced by `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView<'a> {
    leads: Vec<&'a Lead>,
}

impl<'a> FilteredView<'a> {
    pub fn leads(&self) -> &[&'a Lead] {
        &self.leads
    }

    /// Visible ids in display order.
    pub fn ids(&self) -> Vec<LeadId> {
        self.leads.iter().map(|lead| lead.lead_id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    /// When true the caller must show `NO_LEADS_MESSAGE` instead of a table.
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}

/// Applies `query` to the store, hiding every lead present in `moved`.
pub fn apply<'a>(
    store: &'a LeadStore,
    moved: &MovedCollection,
    query: &FilterQuery,
) -> Result<FilteredView<'a>, FilterError> {
    let filterable = store.filterable_fields();
    for category in &query.categories {
        if !category.values.is_empty() && !filterable.contains(&category.field) {
            return Err(FilterError::ColumnNotFilterable(category.field));
        }
    }
    let matcher = query
        .search
        .as_ref()
        .map(|search| compile_search(search).map(|re| re.map(|re| (search.field, re))))
        .transpose()?
        .flatten();

    let moved_ids = moved.lead_ids();
    let leads = store
        .leads()
        .iter()
        .filter(|lead| !moved_ids.contains(lead.lead_id.as_str()))
        .filter(|lead| {
            query.categories.iter().all(|category| {
                category.values.is_empty()
                    || category
                        .values
                        .iter()
                        .any(|value| value == lead.value(category.field))
            })
        })
        .filter(|lead| match &matcher {
            Some((field, re)) => re.is_match(lead.value(*field)),
            None => true,
        })
        .collect();

    Ok(FilteredView { leads })
}

/// Selectable options for a category filter, in first-seen order.
pub fn category_options(store: &LeadStore, field: LeadField) -> Result<Vec<String>, FilterError> {
    let values = store.distinct_values(field);
    if values.len() <= 1 {
        return Err(FilterError::ColumnNotFilterable(field));
    }
    Ok(values.into_iter().map(str::to_string).collect())
}

fn compile_search(search: &SearchFilter) -> Result<Option<Regex>, FilterError> {
    if search.term.is_empty() {
        return Ok(None);
    }
    RegexBuilder::new(&regex::escape(&search.term))
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|err| FilterError::InvalidSearchTerm {
            term: search.term.clone(),
            message: err.to_string(),
        })
}
