//! Session gate decision core
//!
//! Pure per-request evaluation: path + cookies + clock in, verdict out. The
//! HTTP layer owns translating the verdict into redirects and headers, so
//! the gate can run for any number of requests concurrently with no shared
//! state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use fit_shared::constants::{
    ACCESS_TOKEN_COOKIE, AUTH_COOKIE_PREFIX, DASHBOARD_ROUTE, LOGIN_ROUTE,
    SESSION_MAX_AGE_SECONDS, SESSION_START_COOKIE,
};

use crate::cookie::{clear_cookie, parse_session_start, session_start_cookie};
use crate::redirect::safe_protected_next;
use crate::routes::{classify, RouteClass};
use crate::token::{AuthStatus, TokenVerifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateReason {
    AuthRequired,
    SessionExpired,
}

impl GateReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateReason::AuthRequired => "auth_required",
            GateReason::SessionExpired => "session_expired",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    Pass,
    Redirect { location: String },
}

/// Verdict for one request: what to do, plus any `Set-Cookie` values to
/// attach (fresh session marker, or clears on forced expiry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub action: GateAction,
    pub set_cookies: Vec<String>,
}

impl GateOutcome {
    fn pass() -> Self {
        Self {
            action: GateAction::Pass,
            set_cookies: Vec::new(),
        }
    }

    fn redirect(location: String) -> Self {
        Self {
            action: GateAction::Redirect { location },
            set_cookies: Vec::new(),
        }
    }
}

pub struct SessionGate {
    verifier: Option<TokenVerifier>,
    secure_cookies: bool,
}

impl SessionGate {
    /// A gate without a JWT secret lets everything through: navigation
    /// availability wins over strictness when the backend is misconfigured.
    pub fn new(jwt_secret: Option<String>, secure_cookies: bool) -> Self {
        Self {
            verifier: jwt_secret.map(TokenVerifier::new),
            secure_cookies,
        }
    }

    pub fn evaluate(
        &self,
        path: &str,
        query: Option<&str>,
        cookies: &HashMap<String, String>,
        now: DateTime<Utc>,
    ) -> GateOutcome {
        let class = classify(path);
        if class == RouteClass::Open {
            return GateOutcome::pass();
        }

        let verifier = match &self.verifier {
            Some(v) => v,
            None => {
                warn!("auth secret not configured, gate passing request through");
                return GateOutcome::pass();
            }
        };

        let status = verifier.status(cookies.get(ACCESS_TOKEN_COOKIE).map(String::as_str));
        match status {
            AuthStatus::Absent | AuthStatus::Stale => {
                if class == RouteClass::PublicOnly {
                    return GateOutcome::pass();
                }
                let reason = if status == AuthStatus::Stale {
                    GateReason::SessionExpired
                } else {
                    GateReason::AuthRequired
                };
                let requested = match query {
                    Some(q) if !q.is_empty() => format!("{}?{}", path, q),
                    _ => path.to_string(),
                };
                let next = safe_protected_next(&requested);
                debug!(path, reason = reason.as_str(), "redirecting to login");
                GateOutcome::redirect(login_location(reason, next.as_deref()))
            }
            AuthStatus::Authenticated(_) => {
                let started_ms = cookies
                    .get(SESSION_START_COOKIE)
                    .and_then(|v| parse_session_start(v));
                match started_ms {
                    None => {
                        // Missing or unparseable marker: stamp a fresh one.
                        let mut outcome = if class == RouteClass::PublicOnly {
                            GateOutcome::redirect(DASHBOARD_ROUTE.to_string())
                        } else {
                            GateOutcome::pass()
                        };
                        outcome
                            .set_cookies
                            .push(session_start_cookie(now, self.secure_cookies));
                        outcome
                    }
                    Some(started_ms) => {
                        let age_ms = now.timestamp_millis() - started_ms;
                        if age_ms >= SESSION_MAX_AGE_SECONDS * 1000 {
                            debug!(path, age_ms, "session past max age, forcing re-login");
                            let mut outcome = GateOutcome::redirect(login_location(
                                GateReason::SessionExpired,
                                None,
                            ));
                            outcome.set_cookies = expiry_clears(cookies);
                            outcome
                        } else if class == RouteClass::PublicOnly {
                            GateOutcome::redirect(DASHBOARD_ROUTE.to_string())
                        } else {
                            GateOutcome::pass()
                        }
                    }
                }
            }
        }
    }
}

fn login_location(reason: GateReason, next: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("reason", reason.as_str());
    if let Some(next) = next {
        query.append_pair("next", next);
    }
    format!("{}?{}", LOGIN_ROUTE, query.finish())
}

/// Clear the session marker and every auth cookie the request carried.
fn expiry_clears(cookies: &HashMap<String, String>) -> Vec<String> {
    let mut clears = vec![clear_cookie(SESSION_START_COOKIE)];
    let mut auth_names: Vec<&String> = cookies
        .keys()
        .filter(|name| name.starts_with(AUTH_COOKIE_PREFIX))
        .collect();
    auth_names.sort();
    clears.extend(auth_names.into_iter().map(|name| clear_cookie(name)));
    clears
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const SECRET: &str = "test-secret";

    fn gate() -> SessionGate {
        SessionGate::new(Some(SECRET.to_string()), false)
    }

    fn auth_cookies(started_at: Option<DateTime<Utc>>) -> HashMap<String, String> {
        let verifier = TokenVerifier::new(SECRET.to_string());
        let token = verifier.issue("user-1", 3600).unwrap();
        let mut cookies = HashMap::new();
        cookies.insert(ACCESS_TOKEN_COOKIE.to_string(), token);
        if let Some(started) = started_at {
            cookies.insert(
                SESSION_START_COOKIE.to_string(),
                started.timestamp_millis().to_string(),
            );
        }
        cookies
    }

    #[test]
    fn test_open_path_passes_without_evaluation() {
        let outcome = gate().evaluate("/health", None, &HashMap::new(), Utc::now());
        assert_eq!(outcome, GateOutcome::pass());
    }

    #[test]
    fn test_unauthenticated_protected_redirects_with_next() {
        let outcome = gate().evaluate("/dashboard", Some("tab=x"), &HashMap::new(), Utc::now());
        assert_eq!(
            outcome.action,
            GateAction::Redirect {
                location: "/login?reason=auth_required&next=%2Fdashboard%3Ftab%3Dx".to_string()
            }
        );
        assert!(outcome.set_cookies.is_empty());
    }

    #[test]
    fn test_stale_token_reports_session_expired() {
        let verifier = TokenVerifier::new(SECRET.to_string());
        let mut cookies = HashMap::new();
        cookies.insert(
            ACCESS_TOKEN_COOKIE.to_string(),
            verifier.issue("user-1", -3600).unwrap(),
        );
        let outcome = gate().evaluate("/burn", None, &cookies, Utc::now());
        assert_eq!(
            outcome.action,
            GateAction::Redirect {
                location: "/login?reason=session_expired&next=%2Fburn".to_string()
            }
        );
    }

    #[test]
    fn test_unauthenticated_public_route_passes() {
        let outcome = gate().evaluate("/login", None, &HashMap::new(), Utc::now());
        assert_eq!(outcome, GateOutcome::pass());
    }

    #[test]
    fn test_authenticated_without_marker_gets_fresh_cookie() {
        let now = Utc::now();
        let outcome = gate().evaluate("/dashboard", None, &auth_cookies(None), now);
        assert_eq!(outcome.action, GateAction::Pass);
        assert_eq!(outcome.set_cookies.len(), 1);
        assert!(outcome.set_cookies[0]
            .starts_with(&format!("session-start={}", now.timestamp_millis())));
    }

    #[test]
    fn test_unparseable_marker_treated_as_absent() {
        let now = Utc::now();
        let mut cookies = auth_cookies(None);
        cookies.insert(SESSION_START_COOKIE.to_string(), "garbage".to_string());
        let outcome = gate().evaluate("/dashboard", None, &cookies, now);
        assert_eq!(outcome.action, GateAction::Pass);
        assert_eq!(outcome.set_cookies.len(), 1);
    }

    #[test]
    fn test_session_past_max_age_clears_and_redirects() {
        let now = Utc::now();
        let started = now - Duration::seconds(SESSION_MAX_AGE_SECONDS + 1);
        let outcome = gate().evaluate("/calories", None, &auth_cookies(Some(started)), now);
        assert_eq!(
            outcome.action,
            GateAction::Redirect {
                location: "/login?reason=session_expired".to_string()
            }
        );
        assert!(outcome
            .set_cookies
            .contains(&clear_cookie(SESSION_START_COOKIE)));
        assert!(outcome
            .set_cookies
            .contains(&clear_cookie(ACCESS_TOKEN_COOKIE)));
    }

    #[test]
    fn test_expiry_applies_even_on_public_routes() {
        let now = Utc::now();
        let started = now - Duration::seconds(SESSION_MAX_AGE_SECONDS * 2);
        let outcome = gate().evaluate("/login", None, &auth_cookies(Some(started)), now);
        assert_eq!(
            outcome.action,
            GateAction::Redirect {
                location: "/login?reason=session_expired".to_string()
            }
        );
    }

    #[test]
    fn test_fresh_session_passes() {
        let now = Utc::now();
        let started = now - Duration::seconds(60);
        let outcome = gate().evaluate("/dashboard", None, &auth_cookies(Some(started)), now);
        assert_eq!(outcome, GateOutcome::pass());
    }

    #[test]
    fn test_authenticated_public_route_redirects_to_dashboard() {
        let now = Utc::now();
        let started = now - Duration::seconds(60);
        let outcome = gate().evaluate(
            "/login",
            Some("reason=auth_required"),
            &auth_cookies(Some(started)),
            now,
        );
        assert_eq!(
            outcome.action,
            GateAction::Redirect {
                location: "/dashboard".to_string()
            }
        );
    }

    #[test]
    fn test_missing_secret_passes_everything() {
        let gate = SessionGate::new(None, false);
        let outcome = gate.evaluate("/dashboard", None, &HashMap::new(), Utc::now());
        assert_eq!(outcome, GateOutcome::pass());
    }
}
