//! Conversion endpoint
//!
//! POST /api/convert - multipart `file` field, optional `?start=&end=` page window
//!
//! Pipeline per request: validate → persist input → run converter → stream
//! the DOCX back. Every scratch path is owned by a [`ScratchFiles`] guard;
//! on success the guard moves into the response body stream, so the files
//! go away when the stream finishes or the client disconnects.

use std::path::Path;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    routing::post,
    Router,
};
use futures::Stream;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use uuid::Uuid;

use crate::convert::{ConversionJob, ConvertError, PageRange};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::upload::{self, ScratchFiles};

/// MIME type of the produced document
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Room for multipart boundaries and headers on top of the file cap
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Create the conversion router
pub fn router(max_upload_bytes: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD))
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/convert", post(convert))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Convert an uploaded PDF and stream the DOCX back
async fn convert(
    State(state): State<AppState>,
    Query(pages): Query<PageRange>,
    multipart: Multipart,
) -> Result<Response> {
    let pages = pages.validate().map_err(AppError::BadRequest)?;
    let job_id = Uuid::new_v4();
    let scratch = state.scratch();

    let mut files = ScratchFiles::new();
    let saved = upload::accept(
        multipart,
        scratch,
        &mut files,
        state.config().conversion.max_upload_bytes,
    )
    .await?;

    let output = scratch.new_output_path(saved.stem()).await?;
    files.track(&output);

    let job = ConversionJob::new(&saved.path, &output).with_pages(pages);

    tracing::info!(
        job_id = %job_id,
        file_name = %saved.original_name,
        bytes = saved.size,
        converter = %state.converter().describe(),
        "Starting conversion"
    );
    let started = Instant::now();

    if let Err(e) = state.converter().convert(&job).await {
        tracing::warn!(job_id = %job_id, "Conversion failed: {}", e);
        files.cleanup().await;
        return Err(e.into());
    }

    let (file, size) = match open_output(&output).await {
        Ok(opened) => opened,
        Err(source) => {
            files.cleanup().await;
            return Err(ConvertError::MissingOutput {
                path: output,
                source,
            }
            .into());
        }
    };

    tracing::info!(
        job_id = %job_id,
        bytes = size,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Conversion complete"
    );

    let download_name = format!("{}.docx", saved.stem());
    let body = Body::from_stream(stream_then_cleanup(file, files));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, DOCX_MIME)
        .header(header::CONTENT_LENGTH, size)
        .header(header::CONTENT_DISPOSITION, content_disposition(&download_name)?)
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn open_output(path: &Path) -> std::io::Result<(File, u64)> {
    let file = File::open(path).await?;
    let size = file.metadata().await?.len();
    Ok((file, size))
}

/// Stream `file` in chunks, releasing `files` once the stream ends
///
/// Normal completion cleans up explicitly. A read error or a dropped body
/// (client abort) drops the state, and the guard's `Drop` does the same.
fn stream_then_cleanup(
    file: File,
    files: ScratchFiles,
) -> impl Stream<Item = std::io::Result<Bytes>> + Send + 'static {
    futures::stream::try_unfold((file, files), |(file, files)| next_chunk(file, files))
}

async fn next_chunk(
    mut file: File,
    files: ScratchFiles,
) -> std::io::Result<Option<(Bytes, (File, ScratchFiles))>> {
    let mut buf = vec![0u8; STREAM_CHUNK_SIZE];
    let n = file.read(&mut buf).await?;

    if n == 0 {
        drop(file);
        files.cleanup().await;
        return Ok(None);
    }

    buf.truncate(n);
    Ok(Some((Bytes::from(buf), (file, files))))
}

/// `attachment; filename="..."`, plus an RFC 5987 `filename*` for non-ASCII names
fn content_disposition(name: &str) -> Result<HeaderValue> {
    let fallback: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if !c.is_ascii() || c.is_ascii_control() => '_',
            c => c,
        })
        .collect();

    let value = if fallback == name {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(name)
        )
    };

    HeaderValue::from_str(&value).map_err(|e| AppError::Internal(e.to_string()))
}
