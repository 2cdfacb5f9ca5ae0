//! Progress-callback trait for per-file intake events.
//!
//! Inject an [`Arc<dyn IntakeProgressCallback>`] via
//! [`crate::config::IntakeConfigBuilder::progress_callback`] to be told, file
//! by file, what [`crate::intake::intake`] decided. Callers can forward the
//! events to a terminal progress bar, a channel or a UI store without the
//! library knowing how the host application communicates.
//!
//! # Example
//!
//! ```rust
//! use pdf_intake::{IntakeConfig, IntakeProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct RejectCounter {
//!     rejected: AtomicUsize,
//! }
//!
//! impl IntakeProgressCallback for RejectCounter {
//!     fn on_file_rejected(&self, _index: usize, _total: usize, name: &str, reasons: &[&str]) {
//!         self.rejected.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{name}: {}", reasons.join(", "));
//!     }
//! }
//!
//! let config = IntakeConfig::builder()
//!     .progress_callback(Arc::new(RejectCounter { rejected: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the intake pipeline as it processes a batch.
///
/// Implementations must be `Send + Sync`; metadata lookups run concurrently
/// on the tokio runtime. All methods default to no-ops so callers only
/// override what they care about. Indices are 1-based.
pub trait IntakeProgressCallback: Send + Sync {
    /// Called once, before any file is inspected.
    fn on_intake_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called after a file's metadata has been read.
    fn on_file_resolved(&self, index: usize, total_files: usize, name: &str) {
        let _ = (index, total_files, name);
    }

    /// Called for each file that passed validation, in input order.
    fn on_file_accepted(&self, index: usize, total_files: usize, name: &str) {
        let _ = (index, total_files, name);
    }

    /// Called for each rejected file with every reason that applied.
    fn on_file_rejected(&self, index: usize, total_files: usize, name: &str, reasons: &[&str]) {
        let _ = (index, total_files, name, reasons);
    }

    /// Called once after the batch has been classified.
    fn on_intake_complete(&self, total_files: usize, accepted: usize) {
        let _ = (total_files, accepted);
    }
}

/// A no-op implementation; the default when no callback is configured.
pub struct NoopProgressCallback;

impl IntakeProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::IntakeConfig`].
pub type ProgressCallback = Arc<dyn IntakeProgressCallback>;
