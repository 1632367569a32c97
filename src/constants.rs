//! Common constants used throughout the kiln application.

/// Catalog file names looked up in the working directory, in order
pub const CATALOG_FILES: [&str; 3] = ["templates.json", "templates.yml", "templates.yaml"];

/// Variable naming the target directory under the working directory
pub const APP_NAME: &str = "APP_NAME";

/// Branch used when neither the command line nor the repository metadata name one
pub const DEFAULT_BRANCH: &str = "master";

/// Length of generated values when the declaration omits it
pub const DEFAULT_GENERATED_LENGTH: usize = 30;

/// Prefix of the transient archive file created in the working directory
pub const ARCHIVE_PREFIX: &str = ".kiln-archive-";

/// Default package manager program
#[cfg(windows)]
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm.cmd";
#[cfg(not(windows))]
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";
