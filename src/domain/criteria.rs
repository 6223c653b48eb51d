//! Filter and sort criteria driving directory queries.
//!
//! [`QueryCriteria`] is an immutable value: every change produces a new
//! snapshot, and the sort field and direction only ever change together.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::customer::{Customer, CustomerStatus};

/// Sort options offered by the directory filter controls.
pub const SORT_OPTIONS: [(&str, &str); 4] = [
    ("name:asc", "Name (A-Z)"),
    ("name:desc", "Name (Z-A)"),
    ("created_at:desc", "Newest First"),
    ("created_at:asc", "Oldest First"),
];

/// Status options offered by the directory filter controls.
pub const STATUS_OPTIONS: [(&str, &str); 3] = [
    ("all", "All Status"),
    ("active", "Active"),
    ("inactive", "Inactive"),
];

/// Errors raised when a textual criteria change cannot be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("unknown criteria field `{0}`")]
    UnknownField(String),
    #[error("invalid status filter `{0}`")]
    InvalidStatus(String),
    #[error("invalid sort field `{0}`")]
    InvalidSortField(String),
    #[error("invalid sort order `{0}`")]
    InvalidSortOrder(String),
    #[error("sort token `{0}` must look like `<field>:<direction>`")]
    MalformedSortToken(String),
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    /// The status a record must have, or `None` when every status passes.
    pub const fn constraint(self) -> Option<CustomerStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(CustomerStatus::Active),
            StatusFilter::Inactive => Some(CustomerStatus::Inactive),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            other => Err(CriteriaError::InvalidStatus(other.to_string())),
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    CreatedAt,
}

impl SortField {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
        }
    }
}

impl FromStr for SortField {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(SortField::Name),
            "created_at" | "createdAt" => Ok(SortField::CreatedAt),
            other => Err(CriteriaError::InvalidSortField(other.to_string())),
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CriteriaError::InvalidSortOrder(other.to_string())),
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Splits a combined `"<field>:<direction>"` token.
pub fn parse_sort_token(token: &str) -> Result<(SortField, SortOrder), CriteriaError> {
    let (field, order) = token
        .split_once(':')
        .ok_or_else(|| CriteriaError::MalformedSortToken(token.to_string()))?;
    Ok((field.parse()?, order.parse()?))
}

/// A single change to the criteria.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CriteriaChange {
    Search(String),
    Status(StatusFilter),
    /// Field and direction always travel together.
    Sort { by: SortField, order: SortOrder },
    Replace(QueryCriteria),
}

/// Fully populated filter/sort snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct QueryCriteria {
    pub search: String,
    pub status: StatusFilter,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Raw query-string form of the criteria, as submitted by the filter controls.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriteriaParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl QueryCriteria {
    /// Returns a copy with the change applied.
    #[must_use]
    pub fn apply(&self, change: CriteriaChange) -> Self {
        match change {
            CriteriaChange::Search(search) => Self {
                search,
                ..self.clone()
            },
            CriteriaChange::Status(status) => Self {
                status,
                ..self.clone()
            },
            CriteriaChange::Sort { by, order } => Self {
                sort_by: by,
                sort_order: order,
                ..self.clone()
            },
            CriteriaChange::Replace(criteria) => criteria,
        }
    }

    /// Parses a textual `(field, value)` pair into a change.
    ///
    /// The `sort` field takes a combined token such as `created_at:desc`.
    pub fn parse_change(field: &str, value: &str) -> Result<CriteriaChange, CriteriaError> {
        match field {
            "search" => Ok(CriteriaChange::Search(value.to_string())),
            "status" => Ok(CriteriaChange::Status(value.parse()?)),
            "sort" => {
                let (by, order) = parse_sort_token(value)?;
                Ok(CriteriaChange::Sort { by, order })
            }
            other => Err(CriteriaError::UnknownField(other.to_string())),
        }
    }

    /// Returns a new criteria with one textual field replaced.
    pub fn with_field(&self, field: &str, value: &str) -> Result<Self, CriteriaError> {
        Ok(self.apply(Self::parse_change(field, value)?))
    }

    /// Combined sort token, e.g. `name:asc`.
    pub fn sort_token(&self) -> String {
        format!("{}:{}", self.sort_by, self.sort_order)
    }

    /// Builds criteria from query parameters, keeping defaults for any value
    /// that does not parse.
    pub fn from_params(params: &CriteriaParams) -> Self {
        let mut criteria = Self::default();

        if let Some(search) = &params.search {
            criteria.search = search.clone();
        }

        if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
            match status.parse() {
                Ok(status) => criteria.status = status,
                Err(err) => log::warn!("Ignoring status parameter: {err}"),
            }
        }

        if let Some(sort) = params.sort.as_deref().filter(|s| !s.is_empty()) {
            match parse_sort_token(sort) {
                Ok((by, order)) => {
                    criteria.sort_by = by;
                    criteria.sort_order = order;
                }
                Err(err) => log::warn!("Ignoring sort parameter: {err}"),
            }
        }

        criteria
    }

    /// Inverse of [`QueryCriteria::from_params`], omitting default values.
    pub fn to_params(&self) -> CriteriaParams {
        let defaults = Self::default();
        CriteriaParams {
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
            status: (self.status != defaults.status).then(|| self.status.to_string()),
            sort: (self.sort_by != defaults.sort_by || self.sort_order != defaults.sort_order)
                .then(|| self.sort_token()),
        }
    }

    /// In-memory equivalent of the store filter.
    pub fn matches(&self, customer: &Customer) -> bool {
        if self
            .status
            .constraint()
            .is_some_and(|status| customer.status != status)
        {
            return false;
        }

        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        customer.name.to_lowercase().contains(&needle)
            || customer.email.as_str().to_lowercase().contains(&needle)
            || customer
                .company
                .as_ref()
                .is_some_and(|company| company.to_lowercase().contains(&needle))
    }
}
