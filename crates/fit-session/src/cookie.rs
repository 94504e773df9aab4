//! Cookie parsing and the session-start marker codec

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fit_shared::constants::{SESSION_COOKIE_MAX_AGE_DAYS, SESSION_START_COOKIE};

/// Parse a `Cookie` request header into name/value pairs.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Build the session-start `Set-Cookie` value: millisecond epoch, path `/`,
/// `SameSite=Lax`, 30-day cookie lifetime, `Secure` when asked.
pub fn session_start_cookie(now: DateTime<Utc>, secure: bool) -> String {
    let max_age = SESSION_COOKIE_MAX_AGE_DAYS * 24 * 60 * 60;
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_START_COOKIE,
        now.timestamp_millis(),
        max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// A `Set-Cookie` value that removes the named cookie.
pub fn clear_cookie(name: &str) -> String {
    format!("{}=; Path=/; Max-Age=0; SameSite=Lax", name)
}

/// Read the session-start marker back. Unparseable values count as absent.
pub fn parse_session_start(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|ms| *ms >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_cookie_header() {
        let cookies = parse_cookie_header("sb-access-token=abc; session-start=123; theme=dark");
        assert_eq!(cookies.get("sb-access-token").unwrap(), "abc");
        assert_eq!(cookies.get("session-start").unwrap(), "123");
        assert_eq!(cookies.get("theme").unwrap(), "dark");
    }

    #[test]
    fn test_parse_cookie_header_ignores_malformed_pairs() {
        let cookies = parse_cookie_header("good=1; nonsense; =empty");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("good").unwrap(), "1");
    }

    #[test]
    fn test_session_start_cookie_shape() {
        let now = Utc.with_ymd_and_hms(2026, 2, 16, 12, 0, 0).unwrap();
        let cookie = session_start_cookie(now, false);
        assert_eq!(
            cookie,
            format!(
                "session-start={}; Path=/; Max-Age=2592000; SameSite=Lax",
                now.timestamp_millis()
            )
        );
        assert!(session_start_cookie(now, true).ends_with("; Secure"));
    }

    #[test]
    fn test_parse_session_start() {
        assert_eq!(parse_session_start("1700000000000"), Some(1_700_000_000_000));
        assert_eq!(parse_session_start("garbage"), None);
        assert_eq!(parse_session_start("-5"), None);
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        assert_eq!(
            clear_cookie("sb-access-token"),
            "sb-access-token=; Path=/; Max-Age=0; SameSite=Lax"
        );
    }
}
