//! Print job submission through the host's native print command.
//!
//! Two job shapes: original documents (PDFs) are handed to the spooler by
//! path; rendered text is written to a temp file first, printed, and the temp
//! file removed after a grace delay so the spooler has time to pick it up.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::types::PrintError;

pub struct PrintService {
    /// Destination printer; `None` uses the system default.
    printer: Option<String>,
    /// How long rendered temp files stay on disk after job submission.
    spool_grace: Duration,
}

impl PrintService {
    pub fn new(printer: Option<String>, spool_grace: Duration) -> Self {
        Self {
            printer,
            spool_grace,
        }
    }

    /// Submit a file to the spooler as-is.
    pub async fn print_document(&self, path: &Path) -> Result<(), PrintError> {
        debug!("Submitting {} to the print spooler", path.display());
        self.spool(path).await
    }

    /// Render `text` to a temp file and submit that to the spooler. The temp
    /// file is removed after the grace delay; removal failures are ignored.
    pub async fn print_text(&self, file_name: &str, text: &str) -> Result<(), PrintError> {
        let temp_path = temp_print_path(file_name);
        tokio::fs::write(&temp_path, text).await?;
        debug!("Rendered {file_name} to {}", temp_path.display());

        let result = self.spool(&temp_path).await;

        let grace = self.spool_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            let _ = tokio::fs::remove_file(&temp_path).await;
        });

        result
    }

    async fn spool(&self, path: &Path) -> Result<(), PrintError> {
        let output = self
            .spool_command(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PrintError::Spooler(stderr.trim().to_string()));
        }
        Ok(())
    }

    #[cfg(not(windows))]
    fn spool_command(&self, path: &Path) -> Command {
        let mut command = Command::new("lp");
        if let Some(printer) = &self.printer {
            command.arg("-d").arg(printer);
        }
        command.arg(path);
        command
    }

    #[cfg(windows)]
    fn spool_command(&self, path: &Path) -> Command {
        // The print verb routes through the application registered for the
        // file type, which reaches the default printer.
        let mut command = Command::new("powershell");
        command.arg("-NoProfile").arg("-Command").arg(format!(
            "Start-Process -FilePath '{}' -Verb Print",
            path.display()
        ));
        command
    }
}

/// Temp file path for a rendered text job, unique per submission.
fn temp_print_path(file_name: &str) -> PathBuf {
    let stamp = chrono::Utc::now().timestamp_millis();
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    std::env::temp_dir().join(format!("hotfolder-{stamp}-{safe}.txt"))
}
