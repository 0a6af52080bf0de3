//! Core error types

use thiserror::Error;

/// Manifest envelope validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("dashboard name is required")]
    MissingName,

    #[error("folder name is required")]
    MissingFolder,
}

pub type Result<T> = std::result::Result<T, ManifestError>;
