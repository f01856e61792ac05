//! Reading an image out of a multipart request.

use axum::extract::Multipart;
use falls_core::upload::UploadError;
use falls_store::models::image::ImageUpload;

use crate::error::{AppError, AppResult};

/// Multipart field names accepted for the image file.
pub const FILE_FIELDS: [&str; 2] = ["image", "file"];

/// Take the first `image` or `file` field of the request.
///
/// Other fields are skipped. A request without such a field fails with
/// [`UploadError::MissingFile`]; a field with an empty filename fails with
/// [`UploadError::EmptyFilename`].
pub async fn read_image_upload(mut multipart: Multipart) -> AppResult<ImageUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let is_file_field = field.name().is_some_and(|name| FILE_FIELDS.contains(&name));
        if !is_file_field {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().trim().to_string();
        if filename.is_empty() {
            return Err(UploadError::EmptyFilename.into());
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        tracing::debug!(filename = %filename, size = bytes.len(), "Received upload");
        return Ok(ImageUpload::new(filename, bytes.to_vec()));
    }

    Err(UploadError::MissingFile.into())
}
