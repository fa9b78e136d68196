use std::error::Error as _;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Request-level failures. Dependency outages are never represented here;
/// they are captured into the page snapshot instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template error: {}", error_chain(.0))]
    Template(#[from] tera::Error),

    #[error("Page not found: {0}")]
    NotFound(String),
}

/// Joins an error and all of its sources with `": "`.
///
/// Tera reports the useful detail (missing variable, bad filter argument) in
/// the source chain, not in the top-level message.
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Template(_) => {
                tracing::error!(error = %self, "Failed to render status page");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
            AppError::NotFound(path) => {
                tracing::debug!(%path, "No route");
                let status = StatusCode::NOT_FOUND;
                let body = format!(
                    r#"<!DOCTYPE html>
<html>
<head>
    <title>Error {}</title>
</head>
<body>
    <h1>Error {}</h1>
    <p>404 page not found</p>
    <a href="/">Return to status page</a>
</body>
</html>"#,
                    status.as_u16(),
                    status.as_u16(),
                );
                (status, Html(body)).into_response()
            }
        }
    }
}
