use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

/// An upload being written into the storage directory.
///
/// The handle is owned by this value, so every exit path closes it: `finish`
/// and `discard` consume it, and dropping it mid-write closes it as well.
pub struct StoredFile {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl StoredFile {
    pub(crate) fn new(path: PathBuf, file: File) -> Self {
        Self {
            path,
            writer: BufWriter::new(file),
            written: 0,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Append a chunk of upload content
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.writer
            .write_all(chunk)
            .await
            .context("Failed to write to stored file")?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// Flush buffered content and sync it to disk. Returns the file size.
    pub async fn finish(mut self) -> Result<u64> {
        self.writer
            .flush()
            .await
            .context("Failed to flush stored file")?;

        self.writer
            .get_ref()
            .sync_all()
            .await
            .context("Failed to sync stored file to disk")?;

        Ok(self.written)
    }

    /// Close and delete a partially written file
    pub async fn discard(self) -> Result<()> {
        let StoredFile { path, writer, .. } = self;
        drop(writer);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove partial file {:?}", path)),
        }
    }
}
