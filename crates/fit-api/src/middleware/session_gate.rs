//! Session gate middleware
//!
//! Thin translation layer: the pure gate decides, this function speaks HTTP.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tracing::warn;

use fit_session::cookie::parse_cookie_header;
use fit_session::gate::GateAction;

use crate::state::AppState;

pub async fn session_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let cookies = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(parse_cookie_header)
        .unwrap_or_default();

    let outcome = state
        .gate
        .evaluate(&path, query.as_deref(), &cookies, Utc::now());

    let mut response = match &outcome.action {
        GateAction::Pass => next.run(request).await,
        GateAction::Redirect { location } => Redirect::temporary(location).into_response(),
    };

    for cookie in &outcome.set_cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("dropping unencodable set-cookie value: {}", e),
        }
    }

    response
}
