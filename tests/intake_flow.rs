//! End-to-end pipeline tests: a file lands in the watch directory, gets
//! extracted, and is moved to the archive with collision-safe naming.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use hotfolder::{pipeline, Archiver, Config, ContentExtractor, PrintService};

struct Harness {
    watch: TempDir,
    archive: TempDir,
    config: Config,
    extractor: ContentExtractor,
    printer: PrintService,
    archiver: Archiver,
}

impl Harness {
    fn new(archive_enabled: bool) -> Self {
        let watch = TempDir::new().unwrap();
        let archive = TempDir::new().unwrap();

        let mut config = Config::default();
        config.intake.watch_dir = watch.path().to_path_buf();
        config.intake.archive_dir =
            archive_enabled.then(|| archive.path().to_path_buf());
        config.timing.settle_delay_ms = 5;
        config.printing.enabled = false;

        let printer = PrintService::new(None, config.timing.spool_grace());
        let archiver = Archiver::new(config.intake.archive_dir.clone());

        Self {
            watch,
            archive,
            config,
            extractor: ContentExtractor::new(),
            printer,
            archiver,
        }
    }

    fn drop_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.watch.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    async fn process(&self, path: &PathBuf, name: &str) {
        pipeline::process_file(
            &self.config,
            &self.extractor,
            &self.printer,
            &self.archiver,
            path,
            name,
        )
        .await;
    }
}

#[tokio::test]
async fn text_file_is_extracted_and_archived() {
    let harness = Harness::new(true);
    let path = harness.drop_file("note.txt", b"hello world!");

    harness.process(&path, "note.txt").await;

    let archived = harness.archive.path().join("note.txt");
    assert!(!path.exists(), "source should have been moved");
    assert_eq!(fs::read_to_string(archived).unwrap(), "hello world!");
}

#[tokio::test]
async fn colliding_names_both_survive_in_archive() {
    let harness = Harness::new(true);

    let first = harness.drop_file("a.txt", b"first arrival");
    harness.process(&first, "a.txt").await;

    let second = harness.drop_file("a.txt", b"second arrival");
    harness.process(&second, "a.txt").await;

    let entries: Vec<String> = fs::read_dir(harness.archive.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();

    assert_eq!(entries.len(), 2);
    assert!(entries.contains(&"a.txt".to_string()));
    let renamed = entries.iter().find(|n| n.as_str() != "a.txt").unwrap();
    assert!(renamed.starts_with("a_"));
    assert!(renamed.ends_with(".txt"));

    assert_eq!(
        fs::read_to_string(harness.archive.path().join("a.txt")).unwrap(),
        "first arrival"
    );
}

#[tokio::test]
async fn undecodable_pdf_still_gets_archived() {
    let harness = Harness::new(true);
    let path = harness.drop_file("scan.pdf", b"not really a pdf");

    harness.process(&path, "scan.pdf").await;

    assert!(harness.archive.path().join("scan.pdf").exists());
}

#[tokio::test]
async fn without_archive_dir_files_stay_in_watch_dir() {
    let harness = Harness::new(false);
    let path = harness.drop_file("note.txt", b"hello world!");

    harness.process(&path, "note.txt").await;

    assert!(path.exists());
    assert_eq!(
        fs::read_dir(harness.archive.path()).unwrap().count(),
        0,
        "archive directory should be untouched"
    );
}

#[tokio::test]
async fn vanished_file_does_not_panic_the_pipeline() {
    let harness = Harness::new(true);
    let path = harness.watch.path().join("gone.txt");

    // Never created; extraction fails and the pipeline ends quietly.
    harness.process(&path, "gone.txt").await;

    assert_eq!(fs::read_dir(harness.archive.path()).unwrap().count(), 0);
}
