//! Facet resolution
//!
//! Each facet pattern on a leaf becomes one CTE holding the distinct ids of
//! postings whose facet name or slug contains the pattern (case-insensitive).
//! Link tables hold one row per matching facet, so a posting tagged with two
//! matching technologies must still yield a single id.

use crate::utils::sql::escape_like_pattern;

use super::context::CompilationContext;
use super::types::{CompiledFragment, Cte, Facet, FacetPatterns, SqlParams};

/// Every posting id, the base for negation and for the empty leaf
pub const UNIVERSE: &str = "SELECT id FROM job_posts";

/// Source tables for one facet
struct FacetSource {
    /// Posting id column, qualified by the link alias
    post_id: &'static str,
    /// FROM/JOIN clause linking postings to the facet table `f`
    from: &'static str,
}

impl Facet {
    fn source(&self) -> FacetSource {
        match self {
            Facet::Technology => FacetSource {
                post_id: "jpt.job_post_id",
                from: "job_posts_tech jpt JOIN tech f ON f.id = jpt.tech_id",
            },
            Facet::Organization => FacetSource {
                post_id: "jp.id",
                from: "job_posts jp JOIN organizations f ON f.id = jp.organization_id",
            },
            Facet::JobFunction => FacetSource {
                post_id: "jpjf.job_post_id",
                from: "job_posts_job_functions jpjf JOIN job_functions f ON f.id = jpjf.job_function_id",
            },
        }
    }
}

/// Resolve a single facet pattern into a CTE and its one-line select
pub fn resolve_facet(ctx: &mut CompilationContext, facet: Facet, pattern: &str) -> CompiledFragment {
    let name = ctx.cte_name();
    let like = format!("%{}%", escape_like_pattern(pattern));

    let mut params = SqlParams::default();
    let name_param = ctx.bind(&mut params, like.clone());
    let slug_param = ctx.bind(&mut params, like);

    let source = facet.source();
    let sql = format!(
        "SELECT DISTINCT {} AS id FROM {} WHERE f.name ILIKE {} ESCAPE '\\' OR f.slug ILIKE {} ESCAPE '\\'",
        source.post_id, source.from, name_param, slug_param
    );

    tracing::trace!(cte = %name, facet = %facet, "Resolved facet");

    CompiledFragment {
        expression: format!("SELECT id FROM {}", name),
        ctes: vec![Cte { name, sql }],
        params,
    }
}

/// Resolve a leaf: intersection of its facets, or the universe when empty
pub fn resolve_leaf(ctx: &mut CompilationContext, patterns: &FacetPatterns) -> CompiledFragment {
    let parts: Vec<CompiledFragment> = patterns
        .present()
        .map(|(facet, pattern)| resolve_facet(ctx, facet, pattern))
        .collect();

    if parts.is_empty() {
        return CompiledFragment::bare(UNIVERSE);
    }

    super::compiler::combine(parts, "INTERSECT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_technology_facet() {
        let mut ctx = CompilationContext::new();
        let fragment = resolve_facet(&mut ctx, Facet::Technology, "python");

        assert_eq!(fragment.expression, "SELECT id FROM c1");
        assert_eq!(fragment.ctes.len(), 1);
        assert_eq!(fragment.ctes[0].name, "c1");
        assert_eq!(
            fragment.ctes[0].sql,
            r"SELECT DISTINCT jpt.job_post_id AS id FROM job_posts_tech jpt JOIN tech f ON f.id = jpt.tech_id WHERE f.name ILIKE $1 ESCAPE '\' OR f.slug ILIKE $2 ESCAPE '\'"
        );
        assert_eq!(fragment.params.values, vec!["%python%", "%python%"]);
    }

    #[test]
    fn resolve_organization_facet() {
        let mut ctx = CompilationContext::new();
        let fragment = resolve_facet(&mut ctx, Facet::Organization, "acme");

        assert_eq!(
            fragment.ctes[0].sql,
            r"SELECT DISTINCT jp.id AS id FROM job_posts jp JOIN organizations f ON f.id = jp.organization_id WHERE f.name ILIKE $1 ESCAPE '\' OR f.slug ILIKE $2 ESCAPE '\'"
        );
    }

    #[test]
    fn resolve_job_function_facet() {
        let mut ctx = CompilationContext::new();
        let fragment = resolve_facet(&mut ctx, Facet::JobFunction, "eng");

        assert!(fragment.ctes[0].sql.starts_with(
            "SELECT DISTINCT jpjf.job_post_id AS id FROM job_posts_job_functions jpjf JOIN job_functions f"
        ));
        assert_eq!(fragment.params.values, vec!["%eng%", "%eng%"]);
    }

    #[test]
    fn resolve_facet_ids_are_distinct() {
        let mut ctx = CompilationContext::new();
        for facet in Facet::ALL {
            let fragment = resolve_facet(&mut ctx, facet, "s");
            assert!(fragment.ctes[0].sql.starts_with("SELECT DISTINCT "));
        }
    }

    #[test]
    fn resolve_facet_escapes_like_metacharacters() {
        let mut ctx = CompilationContext::new();
        let fragment = resolve_facet(&mut ctx, Facet::Technology, "c_100%");

        assert_eq!(fragment.params.values, vec![r"%c\_100\%%", r"%c\_100\%%"]);
        assert!(!fragment.ctes[0].sql.contains("c_100"));
    }

    #[test]
    fn resolve_facet_never_embeds_pattern() {
        let mut ctx = CompilationContext::new();
        let pattern = "'; DROP TABLE job_posts; --";
        let fragment = resolve_facet(&mut ctx, Facet::Organization, pattern);

        assert!(!fragment.ctes[0].sql.contains("DROP"));
        assert!(!fragment.expression.contains("DROP"));
    }

    #[test]
    fn resolve_empty_leaf_is_universe() {
        let mut ctx = CompilationContext::new();
        let fragment = resolve_leaf(&mut ctx, &FacetPatterns::default());

        assert_eq!(fragment.expression, UNIVERSE);
        assert!(fragment.ctes.is_empty());
        assert!(fragment.params.is_empty());
        assert_eq!(ctx.cte_count(), 0);
    }

    #[test]
    fn resolve_multi_facet_leaf_intersects() {
        let mut ctx = CompilationContext::new();
        let patterns = FacetPatterns {
            technology: Some("rust".to_string()),
            organization: None,
            job_function: Some("data".to_string()),
        };
        let fragment = resolve_leaf(&mut ctx, &patterns);

        assert_eq!(
            fragment.expression,
            "(SELECT id FROM c1) INTERSECT (SELECT id FROM c2)"
        );
        assert_eq!(fragment.ctes[0].name, "c1");
        assert!(fragment.ctes[0].sql.contains("job_posts_tech"));
        assert!(fragment.ctes[1].sql.contains("job_functions"));
        assert_eq!(
            fragment.params.values,
            vec!["%rust%", "%rust%", "%data%", "%data%"]
        );
    }
}
