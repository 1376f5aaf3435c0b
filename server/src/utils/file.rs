//! Path helpers for user-supplied file locations

use std::path::PathBuf;

/// Expand `~` and make relative paths absolute against the working directory.
///
/// Paths are not canonicalized, so the file does not need to exist.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();
    let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if path.is_empty() {
        return cwd();
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        cwd().join(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(
            expand_path("/etc/jobquery.json"),
            PathBuf::from("/etc/jobquery.json")
        );
    }

    #[test]
    fn test_expand_path_relative_becomes_absolute() {
        let result = expand_path("./config/jobquery.json");
        assert!(result.is_absolute());
        assert!(result.ends_with("config/jobquery.json"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let result = expand_path("~/.jobquery/jobquery.json");
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".jobquery/jobquery.json"));
        if let Some(home) = dirs::home_dir() {
            assert!(result.starts_with(home));
        }
    }

    #[test]
    fn test_expand_path_tilde_only() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
        }
    }

    #[test]
    fn test_expand_path_trims_whitespace() {
        assert_eq!(expand_path("  /srv/app  "), PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_expand_path_empty_is_cwd() {
        assert_eq!(expand_path("   "), std::env::current_dir().unwrap());
    }
}
