use std::path::PathBuf;

use thiserror::Error;

/// Failures a collection build reports on purpose.
///
/// These travel inside [`anyhow::Error`]; callers that need to tell them apart
/// use `err.downcast_ref::<BuildError>()`. I/O and YAML errors are not wrapped
/// here and propagate as-is.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("template \"{name}\" does not exist at {}", .path.display())]
    TemplateNotFound { name: String, path: PathBuf },
    #[error("collection key must not be empty")]
    EmptyKey,
    #[error("version must be a string")]
    VersionNotString,
    #[error("{} is not a YAML mapping", .0.display())]
    InvalidMetadata(PathBuf),
    #[error("no collection archive found in build output:\n{0}")]
    ArchiveNotReported(String),
    #[error("build reported archive {} but it does not exist:\n{output}", .path.display())]
    ArchiveMissing { path: PathBuf, output: String },
}
