mod filesystem_validator;
mod test_utils;

use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::multipart::Form;
use reqwest::{Client, StatusCode};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use test_utils::*;

const CONCURRENT_UPLOADS: usize = 50;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("e2e_tests=debug,info")
        .init();

    println!("📁 Running E2E tests against a running server...");
    run_upload_tests().await?;

    println!("\n✅ All E2E tests passed!");

    Ok(())
}

async fn run_upload_tests() -> Result<()> {
    let server_url =
        std::env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let server_data_dir = std::env::var("SERVER_DATA_DIR")
        .map(PathBuf::from)
        .context("SERVER_DATA_DIR must point at the server's UPLOADS_DIRECTORY")?;

    println!("Server URL: {}", server_url);
    println!("Server data dir: {:?}", server_data_dir);

    wait_for_server(&server_url).await?;

    let client = Client::new();
    let mut uploaded = Vec::new();

    let test_result = async {
        println!("\n📤 Testing concurrent uploads...");
        let before = filesystem_validator::stored_files(&server_data_dir)?;
        let (client_ref, url) = (&client, server_url.as_str());
        let responses = join_all((0..CONCURRENT_UPLOADS).map(|i| {
            let filename = format!("file{}.txt", i);
            let content = test_content(i);
            async move { upload_file(client_ref, url, &filename, content).await }
        }))
        .await;

        let mut names = HashSet::new();
        for (i, response) in responses.into_iter().enumerate() {
            let response = response?;
            if response.status != StatusCode::OK {
                anyhow::bail!("Upload {} failed: {} {}", i, response.status, response.body);
            }
            let stored_name = response.stored_name()?.to_string();
            uploaded.push(stored_name.clone());

            filesystem_validator::validate_stored_name(&stored_name, ".txt")?;
            filesystem_validator::validate_stored_file(
                &server_data_dir,
                &stored_name,
                &test_content(i),
            )?;
            names.insert(stored_name);
        }

        if names.len() != CONCURRENT_UPLOADS {
            anyhow::bail!(
                "Expected {} distinct names, got {}",
                CONCURRENT_UPLOADS,
                names.len()
            );
        }
        let after = filesystem_validator::stored_files(&server_data_dir)?;
        if !names.iter().all(|name| after.contains(name) && !before.contains(name)) {
            anyhow::bail!("Uploaded files are not all new files in the data dir");
        }
        println!("  ✓ {} uploads stored under distinct names", names.len());

        println!("\n📤 Testing upload without extension...");
        let response = upload_file(&client, &server_url, "noext", b"plain".to_vec()).await?;
        if response.status != StatusCode::OK {
            anyhow::bail!("Upload failed: {} {}", response.status, response.body);
        }
        let stored_name = response.stored_name()?.to_string();
        uploaded.push(stored_name.clone());
        filesystem_validator::validate_stored_name(&stored_name, "")?;
        filesystem_validator::validate_stored_file(&server_data_dir, &stored_name, b"plain")?;
        println!("  ✓ Stored as {}", stored_name);

        println!("\n📤 Testing request without file field...");
        let before = filesystem_validator::stored_files(&server_data_dir)?;
        let form = Form::new().text("comment", "no file here");
        let response = send_form(&client, &server_url, form).await?;
        if response.status != StatusCode::BAD_REQUEST {
            anyhow::bail!("Expected 400, got {} {}", response.status, response.body);
        }
        if !response.body.starts_with("error parsing uploaded file: ") {
            anyhow::bail!("Unexpected error body: {:?}", response.body);
        }
        if filesystem_validator::stored_files(&server_data_dir)? != before {
            anyhow::bail!("Rejected request changed the data dir");
        }
        println!("  ✓ Rejected with 400 and nothing stored");

        println!("\n📤 Testing upload on an arbitrary path...");
        let url = format!("{}/some/nested/path", server_url.trim_end_matches('/'));
        let response = upload_file(&client, &url, "photo.jpeg", b"jpeg".to_vec()).await?;
        if response.status != StatusCode::OK {
            anyhow::bail!("Upload failed: {} {}", response.status, response.body);
        }
        let stored_name = response.stored_name()?.to_string();
        uploaded.push(stored_name.clone());
        filesystem_validator::validate_stored_name(&stored_name, ".jpeg")?;
        println!("  ✓ Stored as {}", stored_name);

        Ok::<(), anyhow::Error>(())
    };

    let result = test_result.await;

    // Always cleanup, even on error
    if let Err(e) = cleanup_server_data(&server_data_dir, &uploaded) {
        eprintln!("Warning: Failed to cleanup server data: {}", e);
    }

    result
}

/// Remove only the files this run uploaded; the directory belongs to the server
fn cleanup_server_data(server_data_dir: &Path, uploaded: &[String]) -> Result<()> {
    let keep_data = std::env::var("KEEP_TEST_DATA").unwrap_or_else(|_| "false".to_string());
    if keep_data == "true" {
        println!(
            "\n⚠️  Keeping server data (KEEP_TEST_DATA=true): {:?}",
            server_data_dir
        );
        return Ok(());
    }

    println!("\n🧹 Cleaning up {} uploaded files", uploaded.len());
    for name in uploaded {
        let path = server_data_dir.join(name);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove uploaded file: {:?}", path))?;
        }
    }
    println!("✅ Server data cleaned up");
    Ok(())
}
