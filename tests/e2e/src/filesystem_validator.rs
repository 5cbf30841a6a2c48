use anyhow::{Context, Result};
use naming::{is_token_char, TOKEN_LENGTH};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Names of the regular files currently in the uploads directory
pub fn stored_files(server_data_dir: &Path) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    for entry in fs::read_dir(server_data_dir)
        .with_context(|| format!("Failed to read server data dir: {:?}", server_data_dir))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Check a stored name has the token form `<10 url-safe chars><extension>`
pub fn validate_stored_name(stored_name: &str, extension: &str) -> Result<()> {
    let identifier = stored_name.strip_suffix(extension).with_context(|| {
        format!("Stored name {} does not end with {:?}", stored_name, extension)
    })?;

    if identifier.len() != TOKEN_LENGTH {
        anyhow::bail!(
            "Identifier {} has length {} (expected {})",
            identifier,
            identifier.len(),
            TOKEN_LENGTH
        );
    }

    if !identifier.chars().all(is_token_char) {
        anyhow::bail!("Identifier {} is not base64url", identifier);
    }

    Ok(())
}

/// Check the stored file exists and holds exactly the uploaded bytes
pub fn validate_stored_file(server_data_dir: &Path, stored_name: &str, expected: &[u8]) -> Result<()> {
    let file_path = server_data_dir.join(stored_name);

    if !file_path.exists() {
        anyhow::bail!("Stored file does not exist: {:?}", file_path);
    }

    let content =
        fs::read(&file_path).with_context(|| format!("Failed to read file: {:?}", file_path))?;

    if content.len() != expected.len() {
        anyhow::bail!(
            "Stored file {} has {} bytes (expected {})",
            stored_name,
            content.len(),
            expected.len()
        );
    }

    if content != expected {
        anyhow::bail!("Stored file {} content differs from upload", stored_name);
    }

    Ok(())
}
