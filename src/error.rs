//! Error handling for the kiln application.
//! Defines the error taxonomy of the provisioning pipeline and the result alias
//! used throughout the crate.

use dialoguer::console::style;
use std::io;
use thiserror::Error;

/// Errors raised while provisioning a project from a template.
///
/// Every variant except [`Error::DirectoryCreationError`] is fatal to a run. Directory
/// creation failures are reported as warnings by the scaffolding stage and never abort
/// the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// No catalog record matches the requested template name
    #[error("Template '{name}' does not exist.")]
    TemplateNotFound { name: String },

    /// The templates catalog could not be found, parsed or validated
    #[error("Catalog error: {0}.")]
    CatalogError(String),

    /// The user interaction failed (closed terminal, interrupted input)
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Resolved values are structurally unusable
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Network or stream failure while downloading the template archive
    #[error("An error has occurred when attempting to download the template: {0}.")]
    AcquisitionError(String),

    /// Decode or filesystem failure while unpacking the template archive
    #[error("An error has occurred when attempting to extract the template: {0}.")]
    ExtractionError(String),

    /// Filesystem failure while rewriting placeholders in extracted files
    #[error("An error has occurred when attempting to adjust the template: {0}.")]
    SubstitutionError(String),

    /// A single declared directory could not be created
    #[error("Failed to create directory '/{path}': {source}.")]
    DirectoryCreationError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The package manager failed during either install step
    #[error("An error has occurred when attempting to install dependencies: {0}.")]
    DependencyInstallError(String),

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", style(err).red().bright());
    std::process::exit(1);
}
