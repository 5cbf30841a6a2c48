use tracing::error;

/// Helper function for bad request errors.
/// Alternate formatting keeps the whole `anyhow` context chain in the body.
pub fn handle_error<E: std::fmt::Display>(msg: &str, e: E) -> actix_web::Error {
    error!("{}: {:#}", msg, e);
    actix_web::error::ErrorBadRequest(format!("{}: {:#}", msg, e))
}
