use actix_multipart::{Field, Multipart, MultipartError};
use common::FILE_FIELD;
use futures::StreamExt;
use thiserror::Error;
use tracing::warn;

/// Why a request body did not yield an uploaded file
#[derive(Debug, Error)]
pub enum UploadFormError {
    #[error("{0}")]
    Multipart(MultipartError),
    #[error("request has no file field")]
    MissingFileField,
    #[error("file field has no filename")]
    MissingFilename,
}

/// Multipart body of an upload request.
///
/// Once the stream has ended or reported an error it is never polled again.
/// A `Multipart` that failed (no content type, no boundary) yields its error
/// once and must not be read after that.
pub struct UploadForm {
    payload: Multipart,
    finished: bool,
}

impl UploadForm {
    pub fn new(payload: Multipart) -> Self {
        Self {
            payload,
            finished: false,
        }
    }

    /// Stop reading the body. Used after a field stream fails mid-read.
    pub fn abandon(&mut self) {
        self.finished = true;
    }

    /// Advance to the `file` field, discarding any fields sent before it.
    /// Returns the field together with the filename the client supplied.
    pub async fn next_file_field(&mut self) -> Result<(Field, String), UploadFormError> {
        while let Some(field) = self.next_field().await {
            let mut field = field.map_err(UploadFormError::Multipart)?;

            let disposition = field.content_disposition();
            let is_file_field = disposition.and_then(|cd| cd.get_name()) == Some(FILE_FIELD);
            let filename = disposition
                .and_then(|cd| cd.get_filename())
                .filter(|name| !name.is_empty())
                .map(str::to_owned);

            if !is_file_field {
                if let Err(e) = discard_field(&mut field).await {
                    self.abandon();
                    return Err(UploadFormError::Multipart(e));
                }
                continue;
            }

            let filename = filename.ok_or(UploadFormError::MissingFilename)?;
            return Ok((field, filename));
        }

        Err(UploadFormError::MissingFileField)
    }

    /// Read and throw away the remaining fields of the body so the connection
    /// can be reused. Failures are only logged.
    pub async fn drain(&mut self) {
        while let Some(field) = self.next_field().await {
            let result = match field {
                Ok(mut field) => discard_field(&mut field).await,
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                self.abandon();
                warn!("error while discarding request body: {}", e);
                return;
            }
        }
    }

    async fn next_field(&mut self) -> Option<Result<Field, MultipartError>> {
        if self.finished {
            return None;
        }

        match self.payload.next().await {
            Some(Ok(field)) => Some(Ok(field)),
            Some(Err(e)) => {
                self.finished = true;
                Some(Err(e))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

async fn discard_field(field: &mut Field) -> Result<(), MultipartError> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}
