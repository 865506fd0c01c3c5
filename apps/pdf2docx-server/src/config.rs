//! Configuration management for the PDF2DOCX server

use std::env;
use std::path::PathBuf;

/// Default upload cap in megabytes
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub conversion: ConversionConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Interpreter forced through `PDF2DOCX_PYTHON`, tried before anything else
    pub python_override: Option<String>,
    /// Python module invoked with `-m`
    pub module: String,
    /// Root of the `uploads/` and `outputs/` scratch directories
    pub scratch_root: PathBuf,
    pub max_upload_bytes: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            conversion: ConversionConfig::default(),
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            python_override: None,
            module: "pdf2docx".to_string(),
            scratch_root: default_scratch_root(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", env::var("PORT").ok(), 3000)?,
            },
            conversion: ConversionConfig {
                python_override: env::var("PDF2DOCX_PYTHON")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                module: "pdf2docx".to_string(),
                scratch_root: env::var("PDF2DOCX_TMP_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_scratch_root()),
                max_upload_bytes: parse_megabytes(
                    "PDF2DOCX_MAX_UPLOAD_MB",
                    env::var("PDF2DOCX_MAX_UPLOAD_MB").ok(),
                    DEFAULT_MAX_UPLOAD_MB,
                )?,
            },
        })
    }
}

fn default_scratch_root() -> PathBuf {
    env::temp_dir().join("pdf2docx")
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

/// Parse a megabyte count into bytes, rejecting values that overflow `u64`
fn parse_megabytes(
    name: &'static str,
    raw: Option<String>,
    default: u64,
) -> Result<u64, ConfigError> {
    parse_var(name, raw.clone(), default)?
        .checked_mul(1024 * 1024)
        .ok_or_else(|| ConfigError::InvalidValue {
            name,
            value: raw.unwrap_or_default(),
        })
}
