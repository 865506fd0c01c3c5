//! Upload Module
//!
//! Request-scoped file handling:
//! - Multipart intake with name/size validation
//! - Scratch directory layout with collision-free names
//! - Scoped cleanup of every file a request creates

pub mod intake;
pub mod scratch;

pub use intake::{accept, SavedUpload, FILE_FIELD};
pub use scratch::{ScratchDirs, ScratchFiles};
