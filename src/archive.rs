//! Relocation of processed files with collision-safe renaming.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat};
use tracing::info;

/// Moves processed files into the archive directory. An existing file at the
/// destination is never overwritten; the incoming name gets a timestamp infix
/// instead.
pub struct Archiver {
    destination: Option<PathBuf>,
}

impl Archiver {
    pub fn new(destination: Option<PathBuf>) -> Self {
        Self { destination }
    }

    /// Move `source` into the archive directory, creating it if needed.
    /// Returns the final path, or `None` when no archive directory is
    /// configured.
    pub fn archive(&self, source: &Path, file_name: &str) -> io::Result<Option<PathBuf>> {
        let Some(dir) = &self.destination else {
            return Ok(None);
        };
        fs::create_dir_all(dir)?;

        let mut target = dir.join(file_name);
        if target.exists() {
            target = dir.join(stamped_name(file_name, Local::now()));
        }
        fs::rename(source, &target)?;
        info!("Archived {} -> {}", source.display(), target.display());

        Ok(Some(target))
    }
}

/// Insert a filename-safe wall-clock timestamp between stem and extension:
/// `report.txt` becomes `report_<stamp>.txt`.
fn stamped_name(file_name: &str, at: DateTime<Local>) -> String {
    let stamp: String = at
        .to_rfc3339_opts(SecondsFormat::Millis, false)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{stamp}.{ext}"),
        _ => format!("{file_name}_{stamp}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        DateTime::parse_from_rfc3339("2026-08-04T12:30:45.123+00:00")
            .unwrap()
            .with_timezone(&Local)
    }

    #[test]
    fn test_stamped_name_keeps_stem_and_extension() {
        let name = stamped_name("report.txt", fixed_time());

        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".txt"));
        assert_ne!(name, "report.txt");
    }

    #[test]
    fn test_stamped_name_has_no_unsafe_characters() {
        let name = stamped_name("report.txt", fixed_time());

        for c in name.chars() {
            assert!(
                c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'),
                "unexpected character {c:?} in {name}"
            );
        }
    }

    #[test]
    fn test_stamped_name_without_extension() {
        let name = stamped_name("README", fixed_time());
        assert!(name.starts_with("README_"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_no_destination_is_a_noop() {
        let source_dir = TempDir::new().unwrap();
        let source = source_dir.path().join("note.txt");
        fs::write(&source, "hello").unwrap();

        let archiver = Archiver::new(None);
        let moved = archiver.archive(&source, "note.txt").unwrap();

        assert!(moved.is_none());
        assert!(source.exists());
    }

    #[test]
    fn test_moves_into_archive() {
        let source_dir = TempDir::new().unwrap();
        let archive_dir = TempDir::new().unwrap();
        let source = source_dir.path().join("note.txt");
        fs::write(&source, "hello").unwrap();

        let archiver = Archiver::new(Some(archive_dir.path().to_path_buf()));
        let moved = archiver.archive(&source, "note.txt").unwrap().unwrap();

        assert_eq!(moved, archive_dir.path().join("note.txt"));
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(moved).unwrap(), "hello");
    }

    #[test]
    fn test_collision_keeps_existing_file() {
        let source_dir = TempDir::new().unwrap();
        let archive_dir = TempDir::new().unwrap();

        let existing = archive_dir.path().join("report.txt");
        fs::write(&existing, "first").unwrap();

        let source = source_dir.path().join("report.txt");
        fs::write(&source, "second").unwrap();

        let archiver = Archiver::new(Some(archive_dir.path().to_path_buf()));
        let moved = archiver.archive(&source, "report.txt").unwrap().unwrap();

        // The pre-existing file is untouched and the new arrival got a
        // distinct timestamped name.
        assert_eq!(fs::read_to_string(&existing).unwrap(), "first");
        assert_ne!(moved, existing);
        let moved_name = moved.file_name().unwrap().to_str().unwrap();
        assert!(moved_name.starts_with("report_"));
        assert!(moved_name.ends_with(".txt"));
        assert_eq!(fs::read_to_string(&moved).unwrap(), "second");
    }

    #[test]
    fn test_creates_missing_archive_dir() {
        let source_dir = TempDir::new().unwrap();
        let archive_root = TempDir::new().unwrap();
        let nested = archive_root.path().join("processed").join("2026");

        let source = source_dir.path().join("note.txt");
        fs::write(&source, "hello").unwrap();

        let archiver = Archiver::new(Some(nested.clone()));
        archiver.archive(&source, "note.txt").unwrap();

        assert!(nested.join("note.txt").exists());
    }
}
