//! PDF2DOCX Server Library
//!
//! HTTP front for the pdf2docx command-line converter. The binary in
//! main.rs wires these modules together; tests drive the router directly.
//!
//! # Modules
//!
//! - `convert`: Interpreter discovery and the subprocess runner
//! - `upload`: Multipart intake and request-scoped scratch files
//! - `routes`: HTTP endpoints under `/api`

pub mod config;
pub mod convert;
pub mod error;
pub mod routes;
pub mod state;
pub mod upload;
