use anyhow::{Context, Result};
use common::FILE_FIELD;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;

/// Outcome of one POST against the server
pub struct UploadResponse {
    pub status: StatusCode,
    pub body: String,
}

impl UploadResponse {
    /// Stored name at the end of the returned link
    pub fn stored_name(&self) -> Result<&str> {
        let (prefix, name) = self
            .body
            .rsplit_once('/')
            .with_context(|| format!("Response is not a link: {:?}", self.body))?;
        if !prefix.starts_with("https://") {
            anyhow::bail!("Link does not use https: {:?}", self.body);
        }
        Ok(name)
    }
}

pub fn test_content(index: usize) -> Vec<u8> {
    format!("Test file {} content\n", index).repeat(index + 1).into_bytes()
}

/// The server answers every path, so readiness is any response to an empty form
pub async fn wait_for_server(url: &str) -> Result<()> {
    let client = Client::new();

    println!("Waiting for server to be ready...");
    for i in 0..30 {
        if let Ok(response) = client.post(url).multipart(Form::new()).send().await {
            if response.status() == StatusCode::BAD_REQUEST {
                println!("Server is ready!");
                return Ok(());
            }
        }
        if i < 29 {
            sleep(Duration::from_secs(1)).await;
        }
    }

    anyhow::bail!("Server did not become ready within 30 seconds");
}

pub async fn upload_file(
    client: &Client,
    url: &str,
    filename: &str,
    content: Vec<u8>,
) -> Result<UploadResponse> {
    let part = Part::bytes(content).file_name(filename.to_string());
    let form = Form::new().part(FILE_FIELD, part);
    send_form(client, url, form).await
}

pub async fn send_form(client: &Client, url: &str, form: Form) -> Result<UploadResponse> {
    let response = client
        .post(url)
        .multipart(form)
        .send()
        .await
        .with_context(|| format!("Failed to POST to {}", url))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;
    Ok(UploadResponse { status, body })
}
