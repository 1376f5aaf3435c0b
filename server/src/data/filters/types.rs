//! Filter tree and compiler output types

use std::fmt;

use thiserror::Error;

/// Facet dimensions a leaf can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Technology,
    Organization,
    JobFunction,
}

impl Facet {
    /// Resolution order for co-located facets on a single leaf
    pub const ALL: [Facet; 3] = [Facet::Technology, Facet::Organization, Facet::JobFunction];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Facet::Technology => "technology",
            Facet::Organization => "organization",
            Facet::JobFunction => "job_function",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substring patterns carried by a leaf node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetPatterns {
    pub technology: Option<String>,
    pub organization: Option<String>,
    pub job_function: Option<String>,
}

impl FacetPatterns {
    pub fn get(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Technology => self.technology.as_deref(),
            Facet::Organization => self.organization.as_deref(),
            Facet::JobFunction => self.job_function.as_deref(),
        }
    }

    /// A leaf without patterns matches every posting
    pub fn is_empty(&self) -> bool {
        self.technology.is_none() && self.organization.is_none() && self.job_function.is_none()
    }

    /// Present patterns in resolution order
    pub fn present(&self) -> impl Iterator<Item = (Facet, &str)> {
        Facet::ALL
            .into_iter()
            .filter_map(|facet| self.get(facet).map(|pattern| (facet, pattern)))
    }
}

/// Validated boolean filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterNode {
    And(Vec<FilterNode>),
    Or(Vec<FilterNode>),
    Not(Box<FilterNode>),
    Leaf(FacetPatterns),
}

impl FilterNode {
    pub fn empty() -> Self {
        Self::Leaf(FacetPatterns::default())
    }

    pub fn technology(pattern: impl Into<String>) -> Self {
        Self::Leaf(FacetPatterns {
            technology: Some(pattern.into()),
            ..Default::default()
        })
    }

    pub fn organization(pattern: impl Into<String>) -> Self {
        Self::Leaf(FacetPatterns {
            organization: Some(pattern.into()),
            ..Default::default()
        })
    }

    pub fn job_function(pattern: impl Into<String>) -> Self {
        Self::Leaf(FacetPatterns {
            job_function: Some(pattern.into()),
            ..Default::default()
        })
    }

    pub fn not(child: FilterNode) -> Self {
        Self::Not(Box::new(child))
    }
}

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlParams {
    pub values: Vec<String>,
}

impl SqlParams {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn extend(&mut self, other: SqlParams) {
        self.values.extend(other.values);
    }
}

/// Named sub-query declared in the WITH clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cte {
    pub name: String,
    pub sql: String,
}

impl Cte {
    pub fn to_sql(&self) -> String {
        format!("{} AS ({})", self.name, self.sql)
    }
}

/// Compiled identifier-set expression for a sub-tree
///
/// `params` lines up with the placeholders of `ctes` followed by `expression`,
/// in that textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFragment {
    pub expression: String,
    pub ctes: Vec<Cte>,
    pub params: SqlParams,
}

impl CompiledFragment {
    /// Fragment that contributes no CTEs and no parameters
    pub fn bare(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ctes: Vec::new(),
            params: SqlParams::default(),
        }
    }
}

/// Final statement handed to the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: SqlParams,
}

/// Filter validation failures, detected before any SQL is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid filter at {path}: {message}")]
    InvalidShape { path: String, message: String },

    #[error("Filter nesting exceeds maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },
}

impl FilterError {
    pub(crate) fn invalid(path: &str, message: impl Into<String>) -> Self {
        Self::InvalidShape {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_patterns_follow_resolution_order() {
        let patterns = FacetPatterns {
            technology: Some("rust".to_string()),
            organization: None,
            job_function: Some("eng".to_string()),
        };
        let present: Vec<_> = patterns.present().collect();

        assert_eq!(
            present,
            vec![(Facet::Technology, "rust"), (Facet::JobFunction, "eng")]
        );
    }

    #[test]
    fn empty_leaf_has_no_patterns() {
        assert!(FacetPatterns::default().is_empty());
        assert_eq!(FilterNode::empty(), FilterNode::Leaf(FacetPatterns::default()));
    }

    #[test]
    fn cte_renders_declaration() {
        let cte = Cte {
            name: "c1".to_string(),
            sql: "SELECT id FROM job_posts".to_string(),
        };
        assert_eq!(cte.to_sql(), "c1 AS (SELECT id FROM job_posts)");
    }

    #[test]
    fn filter_error_display() {
        let err = FilterError::invalid("$.and_", "must not be empty");
        assert_eq!(err.to_string(), "Invalid filter at $.and_: must not be empty");

        let err = FilterError::DepthExceeded { max_depth: 10 };
        assert_eq!(
            err.to_string(),
            "Filter nesting exceeds maximum depth of 10"
        );
    }
}
