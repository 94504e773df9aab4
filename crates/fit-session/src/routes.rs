//! Route classification for the gate

pub const PROTECTED_ROUTES: &[&str] = &[
    "/dashboard",
    "/bodyweight",
    "/calories",
    "/burn",
    "/insights",
    "/profile",
];

pub const PUBLIC_ROUTES: &[&str] = &["/login", "/signup", "/forgot-password"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Protected,
    /// Login/signup flows an authenticated user has no business visiting.
    PublicOnly,
    /// Everything else skips auth evaluation.
    Open,
}

pub fn classify(path: &str) -> RouteClass {
    if matches_any(path, PROTECTED_ROUTES) {
        RouteClass::Protected
    } else if matches_any(path, PUBLIC_ROUTES) {
        RouteClass::PublicOnly
    } else {
        RouteClass::Open
    }
}

pub fn is_protected(path: &str) -> bool {
    classify(path) == RouteClass::Protected
}

fn matches_any(path: &str, routes: &[&str]) -> bool {
    routes
        .iter()
        .any(|route| path == *route || path.starts_with(&format!("{}/", route)))
}
