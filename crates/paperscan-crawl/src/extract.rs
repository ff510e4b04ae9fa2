//! Text extraction from fetched document bytes
//!
//! [`PdfToText`] stages each document in its own temporary directory, runs
//! `pdftotext` on it and reads the text back. The child process is killed if
//! it exceeds its time budget, so a pathological PDF cannot stall a worker.
//! The staging directory is removed when the call returns, on every path.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{ConfigError, ExtractionError};

/// Default per-document time budget
pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(180);

/// How often a running extractor is polled for exit
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Document bytes → text.
///
/// Called from rayon worker threads, so implementations must be `Sync`.
pub trait ExtractText: Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;

    /// Run once before crawling; an error here aborts the run.
    fn preflight(&self) -> Result<(), ExtractionError> {
        Ok(())
    }
}

impl<E: ExtractText + ?Sized> ExtractText for &E {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        (**self).extract_text(bytes)
    }

    fn preflight(&self) -> Result<(), ExtractionError> {
        (**self).preflight()
    }
}

/// `pdftotext` (poppler-utils) subprocess extractor
#[derive(Debug, Clone)]
pub struct PdfToText {
    /// Executable name or path
    pub command: String,
    pub timeout: Duration,
    /// Parent directory for per-call staging dirs (system temp dir if unset)
    pub staging_root: Option<PathBuf>,
}

impl Default for PdfToText {
    fn default() -> Self {
        Self {
            command: "pdftotext".to_string(),
            timeout: DEFAULT_EXTRACT_TIMEOUT,
            staging_root: None,
        }
    }
}

impl PdfToText {
    fn staging_dir(&self) -> std::io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("paperscan-");
        match &self.staging_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }

    fn run(&self, input: &Path, output: &Path) -> Result<(), ExtractionError> {
        let mut child = Command::new(&self.command)
            .args(["-enc", "UTF-8"])
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ExtractionError::Spawn)?;

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if started.elapsed() >= self.timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ExtractionError::Timeout(self.timeout));
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ExtractionError::Spawn(e));
                }
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(ExtractionError::Failed {
                status: status.code(),
            })
        }
    }
}

impl ExtractText for PdfToText {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let staging = self.staging_dir().map_err(ExtractionError::Staging)?;
        let input = staging.path().join("document.pdf");
        let output = staging.path().join("document.txt");
        std::fs::write(&input, bytes).map_err(ExtractionError::Staging)?;

        self.run(&input, &output)?;

        let text = std::fs::read(&output).map_err(ExtractionError::Staging)?;
        Ok(String::from_utf8_lossy(&text).into_owned())
    }

    /// Check the time budget, that the staging area is writable and that the
    /// extractor can be started.
    fn preflight(&self) -> Result<(), ExtractionError> {
        if self.timeout.is_zero() {
            return Err(ExtractionError::Config(ConfigError::ZeroTimeout(
                "extraction timeout",
            )));
        }
        let staging = self.staging_dir().map_err(ExtractionError::Staging)?;
        std::fs::write(staging.path().join(".writable"), b"").map_err(ExtractionError::Staging)?;

        let status = Command::new(&self.command)
            .arg("-v")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(ExtractionError::Spawn)?;
        log::debug!("{} -v exited with {status}", self.command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_command(command: &str, timeout: Duration) -> PdfToText {
        PdfToText {
            command: command.to_string(),
            timeout,
            staging_root: None,
        }
    }

    #[test]
    fn missing_command_is_spawn_error() {
        let ex = with_command("paperscan-no-such-extractor", Duration::from_secs(1));
        assert!(matches!(
            ex.extract_text(b"%PDF-1.4"),
            Err(ExtractionError::Spawn(_))
        ));
        assert!(matches!(ex.preflight(), Err(ExtractionError::Spawn(_))));
    }

    #[test]
    fn zero_timeout_rejected_before_any_document() {
        let ex = with_command("true", Duration::ZERO);
        assert!(matches!(
            ex.preflight(),
            Err(ExtractionError::Config(ConfigError::ZeroTimeout(_)))
        ));
    }

    #[test]
    fn missing_staging_root_is_staging_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let ex = PdfToText {
            staging_root: Some(dir.path().join("does/not/exist")),
            ..Default::default()
        };
        assert!(matches!(
            ex.extract_text(b"%PDF-1.4"),
            Err(ExtractionError::Staging(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn failing_extractor_reports_status() {
        // `false` ignores its arguments and exits 1
        let ex = with_command("false", Duration::from_secs(5));
        assert!(matches!(
            ex.extract_text(b"not a pdf"),
            Err(ExtractionError::Failed { status: Some(1) })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn staging_dir_removed_after_call() {
        let root = tempfile::TempDir::new().unwrap();
        let ex = PdfToText {
            command: "false".to_string(),
            timeout: Duration::from_secs(5),
            staging_root: Some(root.path().to_path_buf()),
        };
        let _ = ex.extract_text(b"bytes");
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn slow_extractor_times_out() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("slow.sh");
        std::fs::write(&script, "#!/bin/sh\nsleep 5\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let ex = with_command(script.to_str().unwrap(), Duration::from_millis(200));

        let start = Instant::now();
        let result = ex.extract_text(b"bytes");
        assert!(matches!(result, Err(ExtractionError::Timeout(_))));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn reads_output_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("fake.sh");
        // Args: -enc UTF-8 <input> <output>
        std::fs::write(&script, "#!/bin/sh\nprintf 'infor-\\nmation' > \"$4\"\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let ex = with_command(script.to_str().unwrap(), Duration::from_secs(5));
        assert_eq!(ex.extract_text(b"bytes").unwrap(), "infor-\nmation");
    }
}
