//! Job search filter compiler
//!
//! Compiles a nested AND/OR/NOT filter over job posting facets into one
//! parameterized PostgreSQL statement. Facet predicates become CTEs, boolean
//! structure becomes `INTERSECT`/`UNION`/`EXCEPT` over posting ids.
//!
//! ## Usage
//!
//! ```no_run
//! use jobquery_server::data::filters::{compile_query, parse_filter_str};
//!
//! let json_str = r#"{"and_": [{"technology": "rust"}, {"organization": "acme"}]}"#;
//! let filter = parse_filter_str(json_str).unwrap();
//! let query = compile_query(&filter);
//! assert_eq!(query.params.len(), 4);
//! ```

mod assembler;
mod compiler;
mod context;
mod facets;
mod parser;
mod types;

pub use assembler::assemble;
pub use compiler::compile;
pub use context::CompilationContext;
pub use facets::{UNIVERSE, resolve_facet, resolve_leaf};
pub use parser::{parse_filter, parse_filter_str};
pub use types::{
    CompiledFragment, CompiledQuery, Cte, Facet, FacetPatterns, FilterError, FilterNode, SqlParams,
};

/// Compile a validated filter tree into the final statement
///
/// Each call uses a fresh [`CompilationContext`], so concurrent compilations
/// never share names or placeholders.
pub fn compile_query(filter: &FilterNode) -> CompiledQuery {
    let mut ctx = CompilationContext::new();
    let root = compile(filter, &mut ctx);
    let query = assemble(root);

    tracing::debug!(
        ctes = ctx.cte_count(),
        params = query.params.len(),
        "Compiled job search query"
    );
    tracing::trace!(sql = %query.sql, params = ?query.params.values, "Compiled SQL");

    query
}

/// Parse and compile a JSON filter in one step
pub fn compile_filter(value: &serde_json::Value) -> Result<CompiledQuery, FilterError> {
    let filter = parse_filter(value)?;
    Ok(compile_query(&filter))
}
