//! Integration tests for path intake and the session controller.
//!
//! Every test builds its own files inside a `tempfile` directory; files are
//! sparse-extended with `set_len` so large sizes cost no disk space.

use pdf_intake::{
    intake, intake_sync, intake_to_file, FileCategory, IntakeConfig, IntakeError,
    IntakeProgressCallback, IntakeSession, Stage, ToolId, ValidationErrorKind,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const MIB: u64 = 1024 * 1024;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn make_file(dir: &Path, name: &str, len: u64) -> PathBuf {
    let path = dir.join(name);
    let f = File::create(&path).expect("create test file");
    f.set_len(len).expect("size test file");
    path
}

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl IntakeProgressCallback for EventLog {
    fn on_intake_start(&self, total_files: usize) {
        self.events.lock().unwrap().push(format!("start {total_files}"));
    }

    fn on_file_accepted(&self, index: usize, _total: usize, name: &str) {
        self.events.lock().unwrap().push(format!("ok {index} {name}"));
    }

    fn on_file_rejected(&self, index: usize, _total: usize, name: &str, reasons: &[&str]) {
        self.events
            .lock()
            .unwrap()
            .push(format!("reject {index} {name} {}", reasons.join("+")));
    }

    fn on_intake_complete(&self, total_files: usize, accepted: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {accepted}/{total_files}"));
    }
}

// ── Path intake ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_intake_mixed_batch() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        make_file(dir.path(), "b.pdf", 2048),
        make_file(dir.path(), "setup.exe", 100),
        make_file(dir.path(), "empty.pdf", 0),
        make_file(dir.path(), "a.PDF", 1024),
    ];

    let report = intake(&paths, &IntakeConfig::default()).await.unwrap();

    let names: Vec<&str> = report.accepted.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["b.pdf", "a.PDF"]);
    assert_eq!(report.category, FileCategory::Pdf);
    assert!(report.tools.contains(&ToolId::Merge));
    assert!(!report.tools.contains(&ToolId::Split));

    let kinds: Vec<_> = report.errors.iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![ValidationErrorKind::UnsupportedFormat, ValidationErrorKind::EmptyFile]
    );
    assert_eq!(report.stats.total_candidates, 4);
    assert_eq!(report.stats.accepted, 2);
    assert_eq!(report.stats.rejected, 2);
    assert_eq!(report.stats.accepted_bytes, 3072);
    assert!(report.accepted.iter().all(|c| c.last_modified().is_some()));
}

#[tokio::test]
async fn test_intake_respects_size_limit() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        make_file(dir.path(), "huge.jpg", 60 * MIB),
        make_file(dir.path(), "ok.jpg", MIB),
    ];

    let report = intake(&paths, &IntakeConfig::default()).await.unwrap();
    assert_eq!(report.accepted.len(), 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind(), ValidationErrorKind::FileTooLarge);
    assert_eq!(report.category, FileCategory::Image);
    assert_eq!(report.tools, vec![ToolId::ImageToPdf]);

    let strict = IntakeConfig::builder().max_file_size(MIB - 1).build().unwrap();
    let report = intake(&paths, &strict).await.unwrap();
    assert!(!report.has_accepted());
    assert_eq!(report.category, FileCategory::Mixed);
    assert!(report.tools.is_empty());
}

#[tokio::test]
async fn test_rejected_files_sharing_a_name_count_separately() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("d1")).unwrap();
    std::fs::create_dir(dir.path().join("d2")).unwrap();
    let paths = vec![
        make_file(&dir.path().join("d1"), "setup.exe", 10),
        make_file(&dir.path().join("d2"), "setup.exe", 20),
    ];

    let report = intake(&paths, &IntakeConfig::default()).await.unwrap();
    assert_eq!(report.stats.rejected, 2);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors.iter().all(|e| e.name() == "setup.exe"));
}

#[tokio::test]
async fn test_intake_preserves_order_under_concurrency() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..40)
        .map(|i| make_file(dir.path(), &format!("page{i:02}.png"), (i + 1) as u64))
        .collect();
    let config = IntakeConfig::builder().concurrency(16).build().unwrap();

    let report = intake(&paths, &config).await.unwrap();
    let expected: Vec<String> = (0..40).map(|i| format!("page{i:02}.png")).collect();
    let names: Vec<String> = report.accepted.iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_intake_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        make_file(dir.path(), "a.pdf", 10),
        dir.path().join("gone.pdf"),
    ];

    let err = intake(&paths, &IntakeConfig::default()).await.unwrap_err();
    match err {
        IntakeError::FileNotFound { path } => assert!(path.ends_with("gone.pdf")),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_progress_events_in_input_order() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        make_file(dir.path(), "deck.pptx", 10),
        make_file(dir.path(), "blank.exe", 0),
    ];
    let log = Arc::new(EventLog::default());
    let config = IntakeConfig::builder()
        .progress_callback(log.clone())
        .build()
        .unwrap();

    intake(&paths, &config).await.unwrap();

    assert_eq!(
        *log.events.lock().unwrap(),
        vec![
            "start 2".to_string(),
            "ok 1 deck.pptx".to_string(),
            "reject 2 blank.exe unsupported format+file is empty".to_string(),
            "done 1/2".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_intake_to_file_writes_json() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        make_file(dir.path(), "q1.xlsx", 300),
        make_file(dir.path(), "notes.txt", 30),
    ];
    let out = dir.path().join("reports/intake.json");

    let report = intake_to_file(&paths, &out, &IntakeConfig::default())
        .await
        .unwrap();
    assert_eq!(report.category, FileCategory::Spreadsheet);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["category"], "spreadsheet");
    assert_eq!(written["tools"][0], "excel-to-pdf");
    assert_eq!(written["errors"][0]["kind"], "unsupported_format");
    assert_eq!(written["errors"][0]["extension"], "txt");
    assert_eq!(written["stats"]["accepted"], 1);
    assert!(!out.with_extension("json.tmp").exists());
}

#[test]
fn test_intake_sync() {
    let dir = TempDir::new().unwrap();
    let paths = vec![make_file(dir.path(), "letter.docx", 512)];
    let report = intake_sync(&paths, &IntakeConfig::default()).unwrap();
    assert_eq!(report.category, FileCategory::Document);
    assert_eq!(report.tools, vec![ToolId::WordToPdf]);
}

// ── Session ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_flow_from_paths() {
    let dir = TempDir::new().unwrap();
    let first = vec![make_file(dir.path(), "part1.pdf", 100)];
    let second = vec![
        make_file(dir.path(), "part2.pdf", 200),
        make_file(dir.path(), "virus.exe", 200),
    ];
    let config = IntakeConfig::default();

    let mut session = IntakeSession::new(config.clone());
    assert_eq!(session.stage(), Stage::Upload);

    let batch = intake(&first, &config).await.unwrap();
    session.add_batch(&batch.accepted);
    assert_eq!(session.stage(), Stage::Preview);
    assert!(session.select_tool(ToolId::Merge).is_err());

    let mut candidates = Vec::new();
    for p in &second {
        candidates.push(pdf_intake::candidate_from_path(p).await.unwrap());
    }
    assert_eq!(session.add_batch(&candidates), 1);
    assert_eq!(session.errors().len(), 1);

    session.select_tool(ToolId::Merge).unwrap();
    let snap = session.snapshot();
    assert_eq!(snap.stage, Stage::ToolSelected);
    let order: Vec<&str> = snap.files.iter().map(|c| c.name()).collect();
    assert_eq!(order, vec!["part1.pdf", "part2.pdf"]);

    session.reset();
    assert_eq!(session.stage(), Stage::Upload);
}
