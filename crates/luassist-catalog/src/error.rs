//! Error taxonomy of the catalog layer.
//!
//! Only bad configuration (the user-selected file or root path) is an
//! error; everything else is a warning carried as data so a single bad row
//! or line can never abort a load.

use std::path::PathBuf;

use thiserror::Error;

/// Load-time failure the surrounding UI is expected to surface to the user.
/// The catalog is left unchanged when one of these is raised.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read API description file {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("API root {path} is not a directory")]
    InvalidRoot { path: PathBuf },
}

/// A static-table row that could not be compiled; the row is skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedRowWarning {
    /// Index of the row within the table it appeared in.
    pub row: usize,
    pub reason: String,
}

/// A line of an API description file that could not be parsed; the line is
/// skipped and loading continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedEntryWarning {
    pub file: PathBuf,
    /// 1-based line number, matching what an editor would show.
    pub line: usize,
    pub reason: String,
}
