//! PDF rendering: pluggable, trait-based HTML-to-PDF conversion.
//!
//! Default: `ChromiumRenderer`, which launches one headless Chromium process per
//! report and waits for it to exit. `AppState` holds an `Arc<dyn PdfRenderer>`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to launch '{bin}': {source}")]
    Launch {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Renderer timed out after {0:?}")]
    Timeout(Duration),

    #[error("Renderer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Renderer produced no output at {0}")]
    MissingOutput(PathBuf),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}

/// Converts an HTML document into a PDF written at `output`.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str, output: &Path) -> Result<(), RenderError>;
}

/// Headless Chromium via `--print-to-pdf`. No browser reuse between requests.
pub struct ChromiumRenderer {
    chrome_bin: String,
    /// Placed before the built-in flags.
    extra_args: Vec<String>,
    timeout: Duration,
}

impl ChromiumRenderer {
    pub fn new(chrome_bin: impl Into<String>, extra_args: Vec<String>, timeout: Duration) -> Self {
        Self {
            chrome_bin: chrome_bin.into(),
            extra_args,
            timeout,
        }
    }
}

#[async_trait]
impl PdfRenderer for ChromiumRenderer {
    async fn render(&self, html: &str, output: &Path) -> Result<(), RenderError> {
        // Page and browser profile live in a scratch dir removed on drop.
        let workdir = tempfile::Builder::new().prefix("report-render-").tempdir()?;
        let page = workdir.path().join("report.html");
        tokio::fs::write(&page, html).await?;

        let mut cmd = Command::new(&self.chrome_bin);
        cmd.args(&self.extra_args)
            .args([
                "--headless",
                "--disable-gpu",
                "--no-sandbox",
                "--no-pdf-header-footer",
            ])
            .arg(format!("--user-data-dir={}", workdir.path().join("profile").display()))
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(format!("file://{}", page.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(bin = %self.chrome_bin, output = %output.display(), "Launching headless browser");
        let child = cmd.spawn().map_err(|source| RenderError::Launch {
            bin: self.chrome_bin.clone(),
            source,
        })?;

        let finished = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::Timeout(self.timeout))??;

        if !finished.status.success() {
            return Err(RenderError::Failed {
                status: finished.status.to_string(),
                stderr: String::from_utf8_lossy(&finished.stderr).trim().to_string(),
            });
        }

        if !tokio::fs::try_exists(output).await? {
            return Err(RenderError::MissingOutput(output.to_path_buf()));
        }

        info!(output = %output.display(), "PDF rendered");
        Ok(())
    }
}

/// Writes a fixed placeholder PDF and records the HTML it was given.
#[cfg(test)]
#[derive(Default)]
pub struct StubRenderer {
    pub rendered: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
pub const STUB_PDF: &[u8] = b"%PDF-1.4\n% stub\n%%EOF\n";

#[cfg(test)]
#[async_trait]
impl PdfRenderer for StubRenderer {
    async fn render(&self, html: &str, output: &Path) -> Result<(), RenderError> {
        tokio::fs::write(output, STUB_PDF).await?;
        self.rendered.lock().unwrap().push(html.to_string());
        Ok(())
    }
}
