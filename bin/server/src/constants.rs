/// Environment variable holding the storage directory
pub const ENV_UPLOADS_DIRECTORY: &str = "UPLOADS_DIRECTORY";

/// Environment variable holding the maximum file age in hours
pub const ENV_MAX_FILE_AGE: &str = "MAX_FILE_AGE";

/// Default server host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_PORT: u16 = 80;

/// Default interval between collection passes in minutes (2 hours)
pub const DEFAULT_CLEANUP_INTERVAL_MINUTES: u64 = 120;

/// Client request, disconnect and keep-alive timeout in seconds
pub const CLIENT_TIMEOUT_SECONDS: u64 = 60;
