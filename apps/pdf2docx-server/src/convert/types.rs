//! Conversion job types

use std::path::PathBuf;

use serde::Deserialize;

/// Optional page window, 0-based with an exclusive end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageRange {
    #[serde(default)]
    pub start: Option<u32>,
    #[serde(default)]
    pub end: Option<u32>,
}

impl PageRange {
    /// Reject empty or inverted windows
    pub fn validate(self) -> Result<Self, String> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start >= end => Err(format!(
                "Invalid page range: start ({}) must be less than end ({})",
                start, end
            )),
            _ => Ok(self),
        }
    }
}

/// One external conversion: input PDF in, DOCX written to `output`
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub pages: PageRange,
}

impl ConversionJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            pages: PageRange::default(),
        }
    }

    pub fn with_pages(mut self, pages: PageRange) -> Self {
        self.pages = pages;
        self
    }
}
