//! Uploaded image checks and content-addressed naming

use sha2::{Digest, Sha256};

use super::{AppError, AppResult, ErrorCode};

/// Maximum accepted upload (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

pub fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Lowercase extension of `filename`, without the dot
pub fn image_extension(filename: &str) -> AppResult<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ImageInvalid,
                format!("Invalid file extension for: {filename}"),
            )
        })
}

/// Size, extension and content checks
pub fn validate_image(data: &[u8], filename: &str) -> AppResult<String> {
    if data.is_empty() {
        return Err(AppError::with_message(ErrorCode::ImageInvalid, "Empty file provided"));
    }
    if data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::ImageTooLarge,
            format!("File too large. Maximum size is {}MB", MAX_IMAGE_SIZE / 1024 / 1024),
        )
        .with_detail("size", data.len()));
    }

    let ext = image_extension(filename)?;
    let mime = mime_guess::from_ext(&ext).first_or_octet_stream();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) || mime.type_() != mime_guess::mime::IMAGE {
        return Err(AppError::with_message(
            ErrorCode::ImageInvalid,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    // the bytes must really be the format the name claims
    let sniffed = ::image::guess_format(data).map_err(|e| {
        AppError::with_message(ErrorCode::ImageInvalid, format!("Invalid image file: {e}"))
    })?;
    if !sniffed.extensions_str().contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::ImageInvalid,
            format!("File content is {sniffed:?}, not {ext}"),
        ));
    }

    Ok(ext)
}

/// `<dir>/<sha256-hex>.<ext>`
pub fn hashed_path(dir: &str, data: &[u8], ext: &str) -> String {
    format!("{}/{}.{}", dir.trim_end_matches('/'), calculate_hash(data), ext)
}
