//! Kiln scaffolds new projects from packaged templates.
//! It resolves template variables, downloads and unpacks the template archive,
//! rewrites placeholders in the unpacked files, creates extra directories and installs
//! the project dependencies.

/// Archive download into a local temporary file
pub mod acquire;

/// Templates catalog loading and lookup
/// Supports JSON and YAML formats (templates.json, templates.yml, templates.yaml)
pub mod catalog;

/// Command-line interface module for the kiln application
pub mod cli;

/// Common constants
pub mod constants;

/// Error types and handling for the kiln application
pub mod error;

/// Zip archive extraction
pub mod extract;

/// Random values for generated variables
pub mod generate;

/// Package manager invocation
pub mod install;

/// Placeholder grammar and interpolation
pub mod interpolate;

/// Logger initialization
pub mod logger;

/// Stage sequencing of a provisioning run
pub mod pipeline;

/// Progress bars
pub mod progress;

/// User input and interaction handling
pub mod prompt;

/// Repository URL forms
pub mod repository;

/// Variable resolution in declaration order
pub mod resolver;

/// Extra directory creation
pub mod scaffold;

/// Placeholder rewriting across extracted files
pub mod substitute;
