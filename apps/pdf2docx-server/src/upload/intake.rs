//! Multipart upload intake
//!
//! Pulls the `file` part out of a multipart body and streams it to a fresh
//! scratch path. The file name is checked before anything touches disk, and
//! the size cap is enforced while writing. Paths are registered with the
//! caller's [`ScratchFiles`] before creation, so any early return leaves
//! nothing behind once the guard drops.

use std::path::PathBuf;

use axum::extract::Multipart;
use tokio::io::AsyncWriteExt;

use super::scratch::{ScratchDirs, ScratchFiles};
use crate::error::{AppError, Result};

/// Multipart field carrying the PDF
pub const FILE_FIELD: &str = "file";

const SOURCE_EXTENSION: &str = ".pdf";

/// A PDF persisted to scratch storage
#[derive(Debug, Clone)]
pub struct SavedUpload {
    pub path: PathBuf,
    pub original_name: String,
    pub size: u64,
}

impl SavedUpload {
    /// Base name of the upload without its `.pdf` suffix
    pub fn stem(&self) -> &str {
        match source_stem(&self.original_name) {
            "" => "document",
            stem => stem,
        }
    }
}

/// Accept the uploaded PDF, writing it below `dirs`
pub async fn accept(
    mut multipart: Multipart,
    dirs: &ScratchDirs,
    files: &mut ScratchFiles,
    max_bytes: u64,
) -> Result<SavedUpload> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A part without a file name is a plain form value, not an upload
        let original_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        if !has_source_extension(&original_name) {
            return Err(AppError::InvalidFileType(Some(original_name)));
        }

        let path = dirs.new_upload_path().await?;
        files.track(&path);

        let mut file = tokio::fs::File::create(&path).await?;
        let mut size: u64 = 0;

        while let Some(chunk) = field.chunk().await? {
            size += chunk.len() as u64;
            if size > max_bytes {
                tracing::warn!(
                    file_name = %original_name,
                    max_bytes,
                    "Upload exceeded size limit"
                );
                return Err(AppError::FileTooLarge { max_bytes });
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        tracing::debug!(
            file_name = %original_name,
            path = %path.display(),
            bytes = size,
            "Upload saved"
        );

        return Ok(SavedUpload {
            path,
            original_name,
            size,
        });
    }

    Err(AppError::NoFile)
}

/// Case-insensitive `.pdf` check
pub fn has_source_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(SOURCE_EXTENSION)
}

/// Strip directories and the `.pdf` suffix from a client-supplied name
pub fn source_stem(name: &str) -> &str {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);

    let split = base.len().saturating_sub(SOURCE_EXTENSION.len());
    match (base.get(..split), base.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(SOURCE_EXTENSION) => stem,
        _ => base,
    }
}
