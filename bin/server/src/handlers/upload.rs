use crate::handlers::error::handle_error;
use crate::handlers::form::UploadForm;
use crate::state::AppState;
use actix_multipart::{Field, Multipart};
use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use common::file_utils::extension_of;
use common::public_link;
use futures::StreamExt;
use naming::NamingStrategy;
use storage::StoredFile;
use tracing::{debug, info, warn};

/// Store one uploaded file and answer with its public link.
///
/// Mounted as the default service, so every path and method lands here.
pub async fn upload(
    req: HttpRequest,
    payload: Multipart,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let mut form = UploadForm::new(payload);
    let result = receive(&mut form, &state).await;

    // Consume whatever the client is still sending, on success and failure alike
    form.drain().await;

    let stored_name = result?;
    let link = public_link(request_host(&req), &stored_name);

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(link))
}

/// Host the client addressed: the `Host` header, or the authority of an
/// absolute-form request target. Proxy headers are not consulted.
fn request_host(req: &HttpRequest) -> &str {
    req.headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().authority().map(|authority| authority.as_str()))
        .unwrap_or_default()
}

/// Parse the form and write the file field into storage.
/// Returns the stored name (`<identifier><extension>`).
async fn receive(form: &mut UploadForm, state: &AppState) -> ActixResult<String> {
    let (mut field, filename) = form
        .next_file_field()
        .await
        .map_err(|e| handle_error("error parsing uploaded file", e))?;

    let extension = extension_of(&filename);
    let stored_name = allocate_name(state, extension).await;

    info!(
        filename = ?filename,
        stored_name = %stored_name,
        "Upload request received"
    );

    let mut file = state
        .storage
        .create(&stored_name)
        .await
        .map_err(|e| handle_error("error while creating file", e))?;

    if let Err(e) = copy_field(form, &mut field, &mut file).await {
        if let Err(cleanup) = file.discard().await {
            warn!("error while removing partial file: {:#}", cleanup);
        }
        return Err(handle_error("error while saving file", e));
    }

    let size = match file.finish().await {
        Ok(size) => size,
        Err(e) => {
            if let Err(cleanup) = state.storage.remove(&stored_name).await {
                warn!("error while removing partial file: {:#}", cleanup);
            }
            return Err(handle_error("error while saving file", e));
        }
    };

    info!(stored_name = %stored_name, size, "File uploaded");
    Ok(stored_name)
}

/// Stream the field's chunks into the stored file.
/// A broken upload stream leaves nothing worth draining, so the form is abandoned.
async fn copy_field(
    form: &mut UploadForm,
    field: &mut Field,
    file: &mut StoredFile,
) -> anyhow::Result<()> {
    while let Some(chunk) = field.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                form.abandon();
                anyhow::bail!("Failed to read upload stream: {}", e);
            }
        };
        file.write_chunk(&chunk).await?;
    }
    Ok(())
}

/// Pick a stored name that is not currently taken.
///
/// Regenerates up to the strategy's attempt bound. When every candidate is
/// taken the last one is used anyway and the existing file gets overwritten.
async fn allocate_name(state: &AppState, extension: &str) -> String {
    let attempts = state.naming.max_attempts();
    let mut candidate = String::new();

    for attempt in 1..=attempts {
        candidate = NamingStrategy::stored_name(&state.naming.generate(extension), extension);

        match state.storage.exists(&candidate).await {
            Ok(false) => return candidate,
            Ok(true) => debug!(candidate = %candidate, attempt, "Name already taken"),
            Err(e) => {
                // Creating the file will surface the same problem to the client
                debug!("Could not check name {}: {:#}", candidate, e);
                return candidate;
            }
        }
    }

    warn!(
        candidate = %candidate,
        attempts,
        "Every candidate name was taken, overwriting an existing file"
    );
    candidate
}
