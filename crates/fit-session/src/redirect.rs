//! Safe-redirect validation for the `next` parameter

use url::Url;

use crate::routes::is_protected;

/// Validate a candidate redirect target coming back from the login flow.
///
/// Accepted only when it is a single-slash relative path whose route is in
/// the protected set; the query string survives. Everything else is
/// discarded so the login page never bounces a user off-site.
pub fn safe_protected_next(candidate: &str) -> Option<String> {
    if !candidate.starts_with('/') || candidate.starts_with("//") {
        return None;
    }

    let base = Url::parse("http://localhost").ok()?;
    let joined = base.join(candidate).ok()?;
    if !is_protected(joined.path()) {
        return None;
    }

    let mut target = joined.path().to_string();
    if let Some(query) = joined.query() {
        target.push('?');
        target.push_str(query);
    }
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_protected_path_with_query() {
        assert_eq!(
            safe_protected_next("/dashboard?tab=x"),
            Some("/dashboard?tab=x".to_string())
        );
        assert_eq!(
            safe_protected_next("/bodyweight"),
            Some("/bodyweight".to_string())
        );
    }

    #[test]
    fn test_rejects_scheme_relative() {
        assert_eq!(safe_protected_next("//evil.com"), None);
        assert_eq!(safe_protected_next("//evil.com/dashboard"), None);
    }

    #[test]
    fn test_rejects_non_protected_paths() {
        assert_eq!(safe_protected_next("/login"), None);
        assert_eq!(safe_protected_next("/anything"), None);
    }

    #[test]
    fn test_rejects_absolute_and_relative_forms() {
        assert_eq!(safe_protected_next("https://evil.com/dashboard"), None);
        assert_eq!(safe_protected_next("dashboard"), None);
        assert_eq!(safe_protected_next(""), None);
    }
}
