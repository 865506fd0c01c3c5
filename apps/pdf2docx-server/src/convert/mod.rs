//! Conversion Module
//!
//! Wraps the external pdf2docx tool:
//! - Interpreter discovery at startup
//! - Subprocess invocation per request
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pdf2docx_server::convert::{ConversionJob, Converter, InterpreterResolver, Pdf2DocxRunner};
//!
//! let python = InterpreterResolver::new(None, "pdf2docx").resolve();
//! let runner = Pdf2DocxRunner::new(python, "pdf2docx");
//!
//! runner.convert(&ConversionJob::new("in.pdf", "out.docx")).await?;
//! ```

mod interpreter;
mod runner;
mod types;

pub use interpreter::{InterpreterResolver, FALLBACK_INTERPRETER};
pub use runner::{ConvertError, Converter, Pdf2DocxRunner};
pub use types::{ConversionJob, PageRange};
