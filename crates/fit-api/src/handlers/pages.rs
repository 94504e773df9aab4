//! Page-route handler
//!
//! Page navigation is owned by the client app; the server answers every page
//! route with the same shell and lets the client router take over. What
//! matters here is that these routes sit behind the session gate.

use axum::response::Html;

const APP_SHELL: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>fittrack</title>
  <script type="module" src="/assets/app.js"></script>
</head>
<body>
  <div id="app"></div>
</body>
</html>
"#;

pub async fn app_shell() -> Html<&'static str> {
    Html(APP_SHELL)
}
