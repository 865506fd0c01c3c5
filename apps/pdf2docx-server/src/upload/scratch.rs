//! Scratch storage
//!
//! Request-scoped files live under `<root>/uploads` and `<root>/outputs`.
//! Every name carries a fresh UUID so concurrent requests never collide.
//! [`ScratchFiles`] owns the paths a request created and deletes them
//! exactly once, either through [`ScratchFiles::cleanup`] or on drop.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Scratch directory layout
#[derive(Debug, Clone)]
pub struct ScratchDirs {
    uploads: PathBuf,
    outputs: PathBuf,
}

impl ScratchDirs {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            uploads: root.join("uploads"),
            outputs: root.join("outputs"),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads
    }

    pub fn outputs_dir(&self) -> &Path {
        &self.outputs
    }

    /// Fresh path for an uploaded PDF, creating the directory on demand
    pub async fn new_upload_path(&self) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.uploads).await?;
        Ok(self.uploads.join(format!("{}.pdf", Uuid::new_v4())))
    }

    /// Fresh path for a converted document, `<uuid>_<stem>.docx`
    pub async fn new_output_path(&self, stem: &str) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.outputs).await?;
        Ok(self
            .outputs
            .join(format!("{}_{}.docx", Uuid::new_v4(), sanitize_stem(stem))))
    }
}

/// Keep a user-supplied stem safe for use inside a file name
fn sanitize_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .take(100)
        .collect();

    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}

/// Paths owned by one request, removed when the guard is released
#[derive(Debug, Default)]
pub struct ScratchFiles {
    paths: Vec<PathBuf>,
}

impl ScratchFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a path; register before the file is created
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    /// Delete every tracked path now
    pub async fn cleanup(mut self) {
        for path in std::mem::take(&mut self.paths) {
            remove_quietly_async(&path).await;
        }
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        // Blocking std::fs removal since drop cannot await. Only reached on
        // early `?` returns and aborted bodies; awaiting paths call `cleanup`.
        for path in self.paths.drain(..) {
            remove_quietly(&path);
        }
    }
}

fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed scratch file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "Failed to remove scratch file: {}", e),
    }
}

async fn remove_quietly_async(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed scratch file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "Failed to remove scratch file: {}", e),
    }
}
