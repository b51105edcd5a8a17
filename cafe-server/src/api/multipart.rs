//! Multipart form collection

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::utils::{AppError, AppResult};

pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Text fields and files of one multipart request
#[derive(Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Drain the request; parts carrying a file name are kept as files
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
                    if !data.is_empty() {
                        form.files.insert(name, UploadedFile { file_name, data });
                    }
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Trimmed text field; blank counts as missing
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn required(&self, name: &str) -> AppResult<&str> {
        self.text(name).ok_or_else(|| {
            AppError::validation(format!("Field '{name}' is required")).with_detail("field", name)
        })
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
