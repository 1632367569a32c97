//! Creation of the extra directories a template declares.

use log::debug;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::Error;
use crate::interpolate::interpolate;
use crate::resolver::VariableContext;

/// Directories created and failures encountered while scaffolding.
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub created: Vec<PathBuf>,
    pub failed: Vec<Error>,
}

fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn create_one(root: &Path, relative: &str) -> Result<PathBuf, Error> {
    let failure = |source: io::Error| Error::DirectoryCreationError {
        path: relative.to_string(),
        source,
    };
    let path = Path::new(relative);
    if relative.is_empty() || !is_contained(path) {
        return Err(failure(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path must stay inside the project directory",
        )));
    }
    let target = root.join(path);
    fs::create_dir_all(&target).map_err(failure)?;
    Ok(target)
}

/// Creates each entry of `directories`, interpolated against `context`, under `root`.
///
/// A failure on one directory is recorded in the report and the remaining directories
/// are still attempted. Callers report the failures as warnings.
pub fn create_directories(
    root: &Path,
    directories: &[String],
    context: &VariableContext,
) -> ScaffoldReport {
    let mut report = ScaffoldReport::default();
    for directory in directories {
        let relative = interpolate(directory, context);
        match create_one(root, &relative) {
            Ok(path) => report.created.push(path),
            Err(e) => {
                debug!("Skipping directory: {}", e);
                report.failed.push(e);
            }
        }
    }
    report
}
