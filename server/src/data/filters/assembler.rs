//! Final statement assembly
//!
//! Declares the collected CTEs once, joins the identifier set back to the
//! posting attributes, and applies the fixed ordering and result cap.

use crate::core::constants::SEARCH_RESULT_LIMIT;

use super::types::{CompiledFragment, CompiledQuery};

/// Assemble the final statement from a compiled root fragment
pub fn assemble(root: CompiledFragment) -> CompiledQuery {
    let CompiledFragment {
        expression,
        ctes,
        params,
    } = root;

    let with_clause = if ctes.is_empty() {
        String::new()
    } else {
        let declarations: Vec<String> = ctes.iter().map(|cte| cte.to_sql()).collect();
        format!("WITH {}\n", declarations.join(",\n     "))
    };

    let sql = format!(
        "{with_clause}SELECT jp.id::BIGINT AS id, jpd.job_title, o.name AS organization, jpd.location\n\
         FROM ({expression}) AS ids\n\
         JOIN job_posts jp ON jp.id = ids.id\n\
         JOIN job_posts_details jpd ON jpd.id = jp.id\n\
         JOIN organizations o ON o.id = jp.organization_id\n\
         ORDER BY jp.id ASC\n\
         LIMIT {limit}",
        limit = SEARCH_RESULT_LIMIT,
    );

    CompiledQuery { sql, params }
}
