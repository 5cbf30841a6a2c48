pub mod file_utils;

/// Multipart form field that carries the uploaded file
pub const FILE_FIELD: &str = "file";

/// Scheme used when building public links to stored files
pub const PUBLIC_SCHEME: &str = "https";

/// Build the public link for a stored file name served from `host`
pub fn public_link(host: &str, stored_name: &str) -> String {
    format!("{}://{}/{}", PUBLIC_SCHEME, host, stored_name)
}
