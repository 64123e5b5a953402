//! File output.

pub mod csv;
pub mod utils;

use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;
use std::path::Path;

lazy_static! {
    /// Style of the progress bars shown during long computations.
    pub static ref DEFAULT_PROGRESS_STYLE: ProgressStyle =
        ProgressStyle::default_bar().template("Progress: {bar:40}  {percent}% | ETA: {eta}");
}

/// How much non-critical output to print.
#[derive(Clone)]
pub enum Verbosity {
    Quiet,
    Messages,
    Progress(ProgressStyle),
}

impl Verbosity {
    /// Creates verbosity that also shows progress with the default style.
    pub fn with_progress() -> Self {
        Self::Progress(DEFAULT_PROGRESS_STYLE.clone())
    }

    /// Whether status messages should be printed.
    pub fn print_messages(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Creates a progress bar for the given number of items, which is hidden
    /// unless progress should be shown.
    pub fn create_progress_bar(&self, n_items: usize) -> ProgressBar {
        match self {
            Self::Progress(style) => {
                let progress_bar = ProgressBar::new(n_items as u64);
                progress_bar.set_style(style.clone());
                progress_bar
            }
            _ => ProgressBar::hidden(),
        }
    }
}

/// Whether to overwrite existing output files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverwriteMode {
    Ask,
    Always,
    Never,
}

/// Format of an output file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    #[cfg(feature = "json")]
    Json,
}

impl OutputFormat {
    /// Determines the output format from the extension of the given path.
    ///
    /// Paths without a recognized extension are written as CSV.
    pub fn from_path<P: AsRef<Path>>(file_path: P) -> Self {
        match file_path
            .as_ref()
            .extension()
            .map(|extension| extension.to_string_lossy().to_lowercase())
            .as_deref()
        {
            #[cfg(feature = "json")]
            Some("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}
