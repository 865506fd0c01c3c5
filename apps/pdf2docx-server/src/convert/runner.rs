//! pdf2docx subprocess runner
//!
//! Invokes `<interpreter> -m pdf2docx convert <input> <output>` and maps the
//! exit status to a result. The child's stdout/stderr are inherited so the
//! tool's progress output shows up in the server's own streams.
//!
//! ## Requirements
//!
//! - A Python interpreter with `pdf2docx` installed (see [`InterpreterResolver`])
//!
//! [`InterpreterResolver`]: super::InterpreterResolver

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::types::ConversionJob;

/// Errors from running the external converter
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{module} exited with code {}. Hint: ensure {module} is installed in Python '{interpreter}' \
         or set env PDF2DOCX_PYTHON to a valid interpreter.",
        .code.map(|c| c.to_string()).unwrap_or_else(|| "unknown (terminated by signal)".to_string())
    )]
    Exit {
        code: Option<i32>,
        module: String,
        interpreter: String,
    },

    #[error("converter exited successfully but produced no output at '{}': {source}", .path.display())]
    MissingOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can turn a PDF on disk into a DOCX on disk
#[async_trait]
pub trait Converter: Send + Sync {
    /// Human-readable description for logs
    fn describe(&self) -> String;

    /// Run one conversion; the output file exists on `Ok`
    async fn convert(&self, job: &ConversionJob) -> Result<(), ConvertError>;
}

/// Converter backed by the pdf2docx command-line entry point
#[derive(Debug, Clone)]
pub struct Pdf2DocxRunner {
    interpreter: String,
    module: String,
}

impl Pdf2DocxRunner {
    pub fn new(interpreter: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            module: module.into(),
        }
    }

    /// Full argument list passed to the interpreter
    fn args(&self, job: &ConversionJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-m".into(),
            self.module.clone().into(),
            "convert".into(),
            job.input.clone().into(),
            job.output.clone().into(),
        ];

        if let Some(start) = job.pages.start {
            args.push(format!("--start={}", start).into());
        }
        if let Some(end) = job.pages.end {
            args.push(format!("--end={}", end).into());
        }

        args
    }
}

#[async_trait]
impl Converter for Pdf2DocxRunner {
    fn describe(&self) -> String {
        format!("{} -m {}", self.interpreter, self.module)
    }

    async fn convert(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        let status = Command::new(&self.interpreter)
            .args(self.args(job))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            // A dropped request future takes the child down with it
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| ConvertError::Launch {
                program: self.interpreter.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ConvertError::Exit {
                code: status.code(),
                module: self.module.clone(),
                interpreter: self.interpreter.clone(),
            });
        }

        Ok(())
    }
}
