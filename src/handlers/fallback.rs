use crate::core::error::ResourceError;
use axum::http::Uri;

/// JSON 404 for every unmatched route
pub async fn fallback_handler(uri: Uri) -> ResourceError {
    ResourceError::UnknownRoute(uri.path().to_string())
}
