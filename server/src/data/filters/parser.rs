//! Filter parsing
//!
//! Turns an untyped JSON filter object into a validated [`FilterNode`] tree.
//! Shape and depth errors are reported here, before any SQL is generated.

use serde_json::{Map, Value};

use crate::core::constants::{MAX_FILTER_DEPTH, MAX_FILTER_JSON_SIZE};

use super::types::{FacetPatterns, FilterError, FilterNode};

const KEY_AND: &str = "and_";
const KEY_OR: &str = "or_";
const KEY_NOT: &str = "not_";
const KEY_TECHNOLOGY: &str = "technology";
const KEY_TECHNOLOGY_ALIAS: &str = "tech";
const KEY_ORGANIZATION: &str = "organization";
const KEY_JOB_FUNCTION: &str = "job_function";

/// Parse a filter from a JSON string
///
/// Validates JSON size, then parses the document with [`parse_filter`].
pub fn parse_filter_str(json_str: &str) -> Result<FilterNode, FilterError> {
    if json_str.len() > MAX_FILTER_JSON_SIZE {
        return Err(FilterError::invalid(
            "$",
            format!(
                "filter JSON exceeds maximum size of {} bytes",
                MAX_FILTER_JSON_SIZE
            ),
        ));
    }

    let value: Value =
        serde_json::from_str(json_str).map_err(|e| FilterError::invalid("$", e.to_string()))?;
    parse_filter(&value)
}

/// Parse a filter tree from a JSON value
///
/// Combinator precedence on a single object is `and_`, `or_`, `not_`; an
/// object with none of them is a leaf. Unknown keys are ignored.
pub fn parse_filter(value: &Value) -> Result<FilterNode, FilterError> {
    parse_node(value, 0, "$")
}

fn parse_node(value: &Value, depth: usize, path: &str) -> Result<FilterNode, FilterError> {
    if depth >= MAX_FILTER_DEPTH {
        return Err(FilterError::DepthExceeded {
            max_depth: MAX_FILTER_DEPTH,
        });
    }

    let Value::Object(map) = value else {
        return Err(FilterError::invalid(path, "filter must be an object"));
    };

    if let Some(children) = combinator(map, KEY_AND) {
        let path = format!("{}.{}", path, KEY_AND);
        return parse_children(children, depth, &path).map(FilterNode::And);
    }

    if let Some(children) = combinator(map, KEY_OR) {
        let path = format!("{}.{}", path, KEY_OR);
        return parse_children(children, depth, &path).map(FilterNode::Or);
    }

    if let Some(child) = combinator(map, KEY_NOT) {
        let path = format!("{}.{}", path, KEY_NOT);
        return match child {
            Value::Object(inner) if inner.is_empty() => {
                Err(FilterError::invalid(&path, "must not be an empty object"))
            }
            Value::Object(_) => parse_node(child, depth + 1, &path).map(FilterNode::not),
            _ => Err(FilterError::invalid(&path, "must be a filter object")),
        };
    }

    parse_leaf(map, path).map(FilterNode::Leaf)
}

/// Combinator value, treating `null` as absent
fn combinator<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn parse_children(value: &Value, depth: usize, path: &str) -> Result<Vec<FilterNode>, FilterError> {
    let Value::Array(items) = value else {
        return Err(FilterError::invalid(path, "must be a list of filter objects"));
    };

    if items.is_empty() {
        return Err(FilterError::invalid(
            path,
            "must be a non-empty list of filter objects",
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_node(item, depth + 1, &format!("{}[{}]", path, i)))
        .collect()
}

fn parse_leaf(map: &Map<String, Value>, path: &str) -> Result<FacetPatterns, FilterError> {
    let technology = match pattern(map, KEY_TECHNOLOGY, path)? {
        Some(p) => Some(p),
        None => pattern(map, KEY_TECHNOLOGY_ALIAS, path)?,
    };

    Ok(FacetPatterns {
        technology,
        organization: pattern(map, KEY_ORGANIZATION, path)?,
        job_function: pattern(map, KEY_JOB_FUNCTION, path)?,
    })
}

/// Facet pattern, treating `null` and `""` as absent
fn pattern(map: &Map<String, Value>, key: &str, path: &str) -> Result<Option<String>, FilterError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(FilterError::invalid(
            &format!("{}.{}", path, key),
            "must be a string",
        )),
    }
}
