//! Materializes rendered documents on disk and opens them in a local viewer.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::{error::Error, fmt, io};

use tokio::process::Command;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::render::PlotDocument;

#[derive(Debug)]
pub enum DisplayError {
    Io(io::Error),
    FileUrl(PathBuf),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write plot: {err}"),
            Self::FileUrl(path) => write!(f, "cannot build file URL for {}", path.display()),
        }
    }
}

impl Error for DisplayError {}

impl From<io::Error> for DisplayError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Writes documents to `output_dir` and optionally launches the platform
/// opener on them.
#[derive(Debug, Clone)]
pub struct PlotDisplay {
    output_dir: PathBuf,
    open_browser: bool,
}

impl PlotDisplay {
    #[must_use]
    pub const fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            open_browser: true,
        }
    }

    #[must_use]
    pub const fn with_open_browser(mut self, open_browser: bool) -> Self {
        self.open_browser = open_browser;
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the document to a fresh `sentiplot-<uuid>.html` file and opens it.
    ///
    /// A failed browser launch is logged and does not fail the call.
    ///
    /// # Errors
    /// Returns `DisplayError` if the file cannot be written or its path cannot
    /// be expressed as a `file://` URL.
    pub async fn show(&self, document: &PlotDocument) -> Result<PathBuf, DisplayError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = std::path::absolute(
            self.output_dir
                .join(format!("sentiplot-{}.html", Uuid::new_v4())),
        )?;
        tokio::fs::write(&path, document.as_str()).await?;
        info!(
            path = %path.display(),
            datasets = document.dataset_count(),
            "created visualization"
        );

        if self.open_browser {
            let url = Url::from_file_path(&path).map_err(|()| DisplayError::FileUrl(path.clone()))?;
            if let Err(err) = launch_viewer(&url) {
                warn!(url = %url, error = %err, "failed to open visualization");
            }
        }
        Ok(path)
    }
}

fn launch_viewer(url: &Url) -> io::Result<()> {
    let mut command = opener_command();
    command
        .arg(url.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command.spawn().map(drop)
}

#[cfg(target_os = "macos")]
fn opener_command() -> Command {
    Command::new("open")
}

#[cfg(target_os = "windows")]
fn opener_command() -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command() -> Command {
    Command::new("xdg-open")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlotRenderer;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sentiplot-display-{name}-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn show_writes_document_without_opening() {
        let dir = scratch_dir("write");
        let display = PlotDisplay::new(dir.clone()).with_open_browser(false);
        let document = PlotRenderer::default().render(&[]).expect("render");

        let path = display.show(&document).await.expect("show");

        assert!(path.starts_with(std::path::absolute(&dir).expect("absolute dir")));
        let name = path.file_name().and_then(|n| n.to_str()).expect("file name");
        assert!(name.starts_with("sentiplot-") && name.ends_with(".html"));
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, document.as_str());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn each_call_gets_its_own_file() {
        let dir = scratch_dir("unique");
        let display = PlotDisplay::new(dir.clone()).with_open_browser(false);
        let document = PlotRenderer::default().render(&[]).expect("render");

        let first = display.show(&document).await.expect("first");
        let second = display.show(&document).await.expect("second");
        assert_ne!(first, second);

        let _ = std::fs::remove_dir_all(dir);
    }
}
