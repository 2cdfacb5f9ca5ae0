//! Intake entry points: turn file-system paths into a classified report.
//!
//! Only metadata is read — the file name, its length and its modification
//! time. File contents are never opened. A path that cannot be stat'ed is a
//! fatal [`IntakeError`]; a file that exists but fails validation is a
//! non-fatal [`crate::error::ValidationError`] in the report.

use crate::candidate::UploadCandidate;
use crate::catalog::tools_for;
use crate::classify::classify;
use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::output::{IntakeReport, IntakeStats};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Build a candidate from a path's metadata.
pub async fn candidate_from_path(path: impl AsRef<Path>) -> Result<UploadCandidate, IntakeError> {
    let path = path.as_ref();
    let meta = tokio::fs::metadata(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => IntakeError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => IntakeError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => IntakeError::MetadataFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !meta.is_file() {
        return Err(IntakeError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut candidate = UploadCandidate::new(name, meta.len());
    match meta.modified() {
        Ok(at) => candidate = candidate.with_last_modified(at),
        Err(e) => debug!("No modification time for {}: {}", path.display(), e),
    }
    Ok(candidate)
}

/// Validate and classify candidates that are already in memory.
///
/// Fires the accept/reject/complete progress events; never fails.
pub fn intake_candidates(candidates: &[UploadCandidate], config: &IntakeConfig) -> IntakeReport {
    let start = Instant::now();
    let total = candidates.len();
    let validator = config.validator();
    let cb = config.progress_callback.as_ref();

    let mut accepted = Vec::new();
    let mut errors = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        let found = validator.check(candidate);
        if found.is_empty() {
            if let Some(cb) = cb {
                cb.on_file_accepted(i + 1, total, candidate.name());
            }
            accepted.push(candidate.clone());
        } else {
            if let Some(cb) = cb {
                let reasons: Vec<&str> = found.iter().map(|e| e.reason()).collect();
                cb.on_file_rejected(i + 1, total, candidate.name(), &reasons);
            }
            errors.extend(found);
        }
    }

    let category = classify(&accepted);
    let tools = tools_for(category, accepted.len())
        .into_iter()
        .map(|t| t.id)
        .collect();

    let stats = IntakeStats {
        total_candidates: total,
        accepted: accepted.len(),
        rejected: total - accepted.len(),
        accepted_bytes: accepted.iter().map(UploadCandidate::size).sum(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    for e in &errors {
        warn!("Rejected {}", e);
    }
    info!(
        "Accepted {}/{} files as '{}'",
        stats.accepted, stats.total_candidates, category
    );

    if let Some(cb) = cb {
        cb.on_intake_complete(total, stats.accepted);
    }

    IntakeReport {
        accepted,
        errors,
        category,
        tools,
        stats,
    }
}

/// Stat every path, then validate and classify the batch.
///
/// Metadata lookups run `config.concurrency` at a time; the report keeps
/// the input order.
///
/// # Errors
/// - [`IntakeError::InvalidInput`] when `paths` is empty
/// - [`IntakeError::FileNotFound`] / [`IntakeError::PermissionDenied`] /
///   [`IntakeError::NotAFile`] / [`IntakeError::MetadataFailed`] for the
///   first path that cannot be used
pub async fn intake<P: AsRef<Path>>(
    paths: &[P],
    config: &IntakeConfig,
) -> Result<IntakeReport, IntakeError> {
    let total_start = Instant::now();
    if paths.is_empty() {
        return Err(IntakeError::InvalidInput("no files given".into()));
    }
    let total = paths.len();
    info!("Starting intake of {} paths", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_intake_start(total);
    }

    let owned: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    let candidates: Vec<UploadCandidate> = stream::iter(owned.into_iter().enumerate())
        .map(|(i, path)| async move {
            let candidate = candidate_from_path(&path).await?;
            if let Some(ref cb) = config.progress_callback {
                cb.on_file_resolved(i + 1, total, candidate.name());
            }
            Ok::<_, IntakeError>(candidate)
        })
        .buffered(config.concurrency)
        .try_collect()
        .await?;

    let mut report = intake_candidates(&candidates, config);
    report.stats.duration_ms = total_start.elapsed().as_millis() as u64;
    Ok(report)
}

/// Run [`intake`] and write the report as pretty JSON to `output_path`.
pub async fn intake_to_file<P: AsRef<Path>>(
    paths: &[P],
    output_path: impl AsRef<Path>,
    config: &IntakeConfig,
) -> Result<IntakeReport, IntakeError> {
    let report = intake(paths, config).await?;
    let path = output_path.as_ref();
    let write_err = |e: std::io::Error| IntakeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let json = serde_json::to_vec_pretty(&report)
        .map_err(|e| IntakeError::Internal(format!("Failed to serialise report: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    // Write to a sibling temp file, then rename over the target.
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &json).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;

    debug!("Report written to {}", path.display());
    Ok(report)
}

/// Synchronous wrapper around [`intake`].
///
/// Creates a temporary tokio runtime internally.
pub fn intake_sync<P: AsRef<Path>>(
    paths: &[P],
    config: &IntakeConfig,
) -> Result<IntakeReport, IntakeError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| IntakeError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(intake(paths, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolId;
    use crate::classify::FileCategory;
    use crate::progress::NoopProgressCallback;
    use std::sync::Arc;

    #[test]
    fn intake_candidates_builds_report() {
        let report = intake_candidates(
            &[
                UploadCandidate::new("a.pdf", 10),
                UploadCandidate::new("b.pdf", 20),
                UploadCandidate::new("c.exe", 0),
            ],
            &IntakeConfig::default(),
        );
        assert_eq!(report.category, FileCategory::Pdf);
        assert!(report.tools.contains(&ToolId::Merge));
        assert_eq!(report.errors.len(), 2);
        assert_eq!(
            report.stats,
            IntakeStats {
                total_candidates: 3,
                accepted: 2,
                rejected: 1,
                accepted_bytes: 30,
                duration_ms: report.stats.duration_ms,
            }
        );
    }

    #[test]
    fn callback_does_not_change_the_report() {
        let candidates = [
            UploadCandidate::new("a.pdf", 10),
            UploadCandidate::new("b.exe", 0),
            UploadCandidate::new("c.pdf", 60 * 1024 * 1024),
            UploadCandidate::new("d.pdf", 5),
        ];
        let quiet = intake_candidates(&candidates, &IntakeConfig::default());
        let with_cb = IntakeConfig::builder()
            .progress_callback(Arc::new(NoopProgressCallback))
            .build()
            .unwrap();
        let loud = intake_candidates(&candidates, &with_cb);

        let expected = crate::validate::validate(&candidates);
        assert_eq!(loud.accepted, expected.accepted);
        assert_eq!(loud.errors, expected.errors);
        assert_eq!(loud.accepted, quiet.accepted);
        assert_eq!(loud.errors, quiet.errors);
        assert_eq!(loud.category, quiet.category);
        assert_eq!(loud.tools, quiet.tools);
    }

    #[tokio::test]
    async fn empty_path_list_is_invalid() {
        let paths: Vec<PathBuf> = vec![];
        let err = intake(&paths, &IntakeConfig::default()).await.unwrap_err();
        assert!(matches!(err, IntakeError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn missing_path_is_not_found() {
        let err = candidate_from_path("/definitely/not/here.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, IntakeError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = candidate_from_path(dir.path()).await.unwrap_err();
        assert!(matches!(err, IntakeError::NotAFile { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn path_through_a_file_is_metadata_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.pdf");
        std::fs::write(&file, b"%PDF").unwrap();
        let err = candidate_from_path(file.join("inner.pdf"))
            .await
            .unwrap_err();
        match err {
            IntakeError::MetadataFailed { path, .. } => assert!(path.ends_with("inner.pdf")),
            other => panic!("expected MetadataFailed, got {other:?}"),
        }
    }
}
