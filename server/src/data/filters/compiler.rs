//! Boolean filter compiler
//!
//! Translates a [`FilterNode`] tree into a single identifier-set expression
//! using SQL set operations:
//!
//! | node  | set operation                         |
//! |-------|---------------------------------------|
//! | `And` | `INTERSECT` of the children           |
//! | `Or`  | `UNION` of the children               |
//! | `Not` | universe `EXCEPT` the child           |
//! | leaf  | facet CTEs, see [`super::facets`]      |
//!
//! `NOT` always subtracts from the full universe of postings, never from the
//! operands of an enclosing `AND`/`OR`. Children are compiled left to right,
//! depth first, and their CTEs and parameters are concatenated in that order,
//! which is also the order their placeholders were numbered in.

use super::context::CompilationContext;
use super::facets::{UNIVERSE, resolve_leaf};
use super::types::{CompiledFragment, FilterNode, SqlParams};

const INTERSECT: &str = "INTERSECT";
const UNION: &str = "UNION";
const EXCEPT: &str = "EXCEPT";

/// Compile a filter sub-tree into an identifier-set fragment
pub fn compile(node: &FilterNode, ctx: &mut CompilationContext) -> CompiledFragment {
    match node {
        FilterNode::Leaf(patterns) => resolve_leaf(ctx, patterns),
        FilterNode::And(children) => combine(compile_children(children, ctx), INTERSECT),
        FilterNode::Or(children) => combine(compile_children(children, ctx), UNION),
        FilterNode::Not(child) => {
            let child = compile(child, ctx);
            combine(vec![CompiledFragment::bare(UNIVERSE), child], EXCEPT)
        }
    }
}

fn compile_children(children: &[FilterNode], ctx: &mut CompilationContext) -> Vec<CompiledFragment> {
    children.iter().map(|child| compile(child, ctx)).collect()
}

/// Join fragments with a set operator, merging CTEs and parameters in order
///
/// A single fragment is returned unchanged.
pub(crate) fn combine(mut parts: Vec<CompiledFragment>, op: &str) -> CompiledFragment {
    if parts.len() == 1
        && let Some(only) = parts.pop()
    {
        return only;
    }

    let mut expressions = Vec::with_capacity(parts.len());
    let mut ctes = Vec::new();
    let mut params = SqlParams::default();

    for part in parts {
        expressions.push(format!("({})", part.expression));
        ctes.extend(part.ctes);
        params.extend(part.params);
    }

    CompiledFragment {
        expression: expressions.join(&format!(" {} ", op)),
        ctes,
        params,
    }
}
