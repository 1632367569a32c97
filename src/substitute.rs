//! File-content substitution.
//! Rewrites placeholders naming resolved variables across every file of an extracted
//! tree. Placeholders naming undeclared variables are left as they are.

use log::{debug, trace};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::interpolate::substitute_declared;
use crate::resolver::VariableContext;

/// Counts reported by a substitution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    pub files_scanned: usize,
    pub files_rewritten: usize,
}

fn substitution_error(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::SubstitutionError(format!("'{}': {}", path.display(), e))
}

/// Applies every variable of `context` to every file under `root` in a single pass per
/// file. Files that are not valid UTF-8 are skipped; unchanged files are not written.
///
/// # Errors
/// * `Error::SubstitutionError` if a file cannot be traversed, read or written
pub fn substitute_tree(root: &Path, context: &VariableContext) -> Result<SubstitutionReport> {
    let mut report = SubstitutionReport::default();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| substitution_error(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        report.files_scanned += 1;

        let bytes = fs::read(path).map_err(|e| substitution_error(path, e))?;
        let Ok(content) = String::from_utf8(bytes) else {
            trace!("Skipping binary file {}", path.display());
            continue;
        };

        if let Cow::Owned(rewritten) = substitute_declared(&content, context) {
            debug!("Adjusting {}", path.display());
            fs::write(path, rewritten).map_err(|e| substitution_error(path, e))?;
            report.files_rewritten += 1;
        }
    }

    Ok(report)
}
