//! Configuration types for file intake.
//!
//! All intake behaviour is controlled through [`IntakeConfig`], built via its
//! [`IntakeConfigBuilder`]. The builder clamps obviously bad values and
//! `build()` rejects the rest, so a constructed config is always usable.

use crate::error::IntakeError;
use crate::progress::ProgressCallback;
use crate::validate::{Validator, DEFAULT_MAX_FILE_SIZE};
use std::fmt;

/// Upper bound for the per-file size limit: 4 GiB.
pub const MAX_FILE_SIZE_CEILING: u64 = 4 * 1024 * 1024 * 1024;

/// Configuration for an intake run or session.
///
/// # Example
/// ```rust
/// use pdf_intake::IntakeConfig;
///
/// let config = IntakeConfig::builder()
///     .max_file_size_mib(20)
///     .concurrency(4)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_file_size, 20 * 1024 * 1024);
/// ```
#[derive(Clone)]
pub struct IntakeConfig {
    /// Largest accepted file in bytes. Default: 50 MiB.
    pub max_file_size: u64,

    /// Number of concurrent metadata lookups when resolving paths. Default: 8.
    pub concurrency: usize,

    /// Optional per-file event sink.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            concurrency: 8,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for IntakeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeConfig")
            .field("max_file_size", &self.max_file_size)
            .field("concurrency", &self.concurrency)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn IntakeProgressCallback>"),
            )
            .finish()
    }
}

impl IntakeConfig {
    /// Create a new builder for `IntakeConfig`.
    pub fn builder() -> IntakeConfigBuilder {
        IntakeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Validator enforcing this config's size limit.
    pub fn validator(&self) -> Validator {
        Validator::new(self.max_file_size)
    }
}

/// Builder for [`IntakeConfig`].
#[derive(Debug)]
pub struct IntakeConfigBuilder {
    config: IntakeConfig,
}

impl IntakeConfigBuilder {
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    /// Size limit in MiB, the unit the CLI exposes.
    pub fn max_file_size_mib(self, mib: u64) -> Self {
        self.max_file_size(mib.saturating_mul(1024 * 1024))
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<IntakeConfig, IntakeError> {
        let c = &self.config;
        if c.max_file_size == 0 {
            return Err(IntakeError::InvalidConfig(
                "Maximum file size must be ≥ 1 byte".into(),
            ));
        }
        if c.max_file_size > MAX_FILE_SIZE_CEILING {
            return Err(IntakeError::InvalidConfig(format!(
                "Maximum file size must be ≤ 4 GiB, got {} bytes",
                c.max_file_size
            )));
        }
        Ok(self.config)
    }
}
