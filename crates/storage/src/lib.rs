pub mod filesystem;
pub mod retention;

use anyhow::Result;
use async_trait::async_trait;
use std::time::SystemTime;

pub use filesystem::{FilesystemStorage, StoredFile};
pub use retention::{RetentionPolicy, SweepReport};

/// Storage backend trait for stored uploads
#[async_trait]
pub trait Storage: Send + Sync {
    /// Check whether a stored file with this name is currently present
    async fn exists(&self, name: &str) -> Result<bool>;

    /// Create the named file, truncating any existing file of the same name,
    /// and return a writer for its content
    async fn create(&self, name: &str) -> Result<StoredFile>;

    /// Remove a stored file. Returns `false` if it was already gone.
    async fn remove(&self, name: &str) -> Result<bool>;

    /// Run one collection pass, deleting files older than the policy allows.
    /// Per-entry failures are logged and counted; only a failure to list the
    /// directory is returned as an error.
    async fn collect_garbage(
        &self,
        policy: &RetentionPolicy,
        now: SystemTime,
    ) -> Result<SweepReport>;
}
