//! SQL utility functions

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Pair with `ESCAPE '\'` so the pattern is matched literally.
///
/// # Example
///
/// ```
/// use jobquery_server::utils::sql::escape_like_pattern;
///
/// let pattern = format!("%{}%", escape_like_pattern("c_100%"));
/// assert_eq!(pattern, "%c\\_100\\%%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern_plain_text() {
        assert_eq!(escape_like_pattern("python"), "python");
        assert_eq!(escape_like_pattern(""), "");
    }

    #[test]
    fn test_escape_like_pattern_metacharacters() {
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("data_eng"), "data\\_eng");
        assert_eq!(escape_like_pattern("c\\d"), "c\\\\d");
    }

    #[test]
    fn test_escape_like_pattern_mixed() {
        assert_eq!(escape_like_pattern("c++_%\\"), "c++\\_\\%\\\\");
    }

    #[test]
    fn test_escape_like_pattern_unicode() {
        assert_eq!(escape_like_pattern("données_ü"), "données\\_ü");
    }
}
