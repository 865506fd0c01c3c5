//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::convert::Converter;
use crate::upload::ScratchDirs;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    converter: Arc<dyn Converter>,
    scratch: ScratchDirs,
}

impl AppState {
    /// Create a new application state
    ///
    /// The converter is injected so tests can swap the subprocess runner
    /// for an in-process fake.
    pub fn new(config: Config, converter: Arc<dyn Converter>) -> Self {
        let scratch = ScratchDirs::new(&config.conversion.scratch_root);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                converter,
                scratch,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the converter
    pub fn converter(&self) -> &dyn Converter {
        self.inner.converter.as_ref()
    }

    /// Get the scratch directory layout
    pub fn scratch(&self) -> &ScratchDirs {
        &self.inner.scratch
    }
}
