//! Per-compilation name and placeholder allocation

use super::types::SqlParams;

/// Prefix for generated CTE names (`c1`, `c2`, ...)
const CTE_PREFIX: &str = "c";

/// Request-scoped compiler state
///
/// Hands out CTE names and positional placeholders. Both counters only ever
/// increase, so every name is unique within one compilation and placeholder
/// numbers follow allocation order. Create one per compilation; it is
/// intentionally neither `Clone` nor shared.
#[derive(Debug, Default)]
pub struct CompilationContext {
    ctes: usize,
    placeholders: usize,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next CTE name
    pub fn cte_name(&mut self) -> String {
        self.ctes += 1;
        format!("{}{}", CTE_PREFIX, self.ctes)
    }

    /// Bind a value and return its placeholder (`$n`)
    pub fn bind(&mut self, params: &mut SqlParams, value: String) -> String {
        params.values.push(value);
        self.placeholders += 1;
        format!("${}", self.placeholders)
    }

    pub fn cte_count(&self) -> usize {
        self.ctes
    }

    #[cfg(test)]
    pub(crate) fn placeholder_count(&self) -> usize {
        self.placeholders
    }
}
