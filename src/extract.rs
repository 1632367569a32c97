//! Archive extraction.
//! Unpacks a downloaded zip archive into the target directory entry by entry. Hosted
//! archive downloads wrap the project in a single `<repo>-<branch>/` folder. When the
//! caller names that folder and every entry sits under it, it is stripped so the
//! project lands directly in the target directory. Any other layout is kept as is.

use indicatif::ProgressBar;
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Component, Path, PathBuf};
use zip::ZipArchive;

use crate::acquire::LocalArchive;
use crate::error::{Error, Result};

/// Outcome of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTree {
    pub root: PathBuf,
    pub entries: usize,
}

fn extraction_error<E: std::fmt::Display>(e: E) -> Error {
    Error::ExtractionError(e.to_string())
}

const SYMLINK_MODE: u32 = 0o120000;
const FILE_TYPE_MASK: u32 = 0o170000;

/// Returns `wrapper` as a path when every entry lives under that folder.
fn wrapper_root(names: &[Option<PathBuf>], wrapper: &str) -> Option<PathBuf> {
    let mut nested = false;
    for name in names.iter().flatten() {
        let mut components = name.components();
        match components.next() {
            Some(Component::Normal(first)) if first == wrapper => {}
            _ => return None,
        }
        nested |= components.next().is_some();
    }
    nested.then(|| PathBuf::from(wrapper))
}

fn is_symlink(mode: Option<u32>) -> bool {
    mode.is_some_and(|mode| mode & FILE_TYPE_MASK == SYMLINK_MODE)
}

/// Unpacks every entry of `reader` under `output_dir`, stripping the `wrapper` folder
/// if the whole archive sits inside it.
///
/// Progress advances by each entry's uncompressed size.
pub fn extract_zip<R: Read + Seek>(
    reader: R,
    output_dir: &Path,
    wrapper: Option<&str>,
    progress: &ProgressBar,
) -> Result<usize> {
    let mut archive = ZipArchive::new(reader).map_err(extraction_error)?;

    let mut names = Vec::with_capacity(archive.len());
    let mut total = 0u64;
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(extraction_error)?;
        total += entry.size();
        names.push(entry.enclosed_name().map(|p| p.to_path_buf()));
    }
    progress.set_length(total);

    let root = wrapper.and_then(|wrapper| wrapper_root(&names, wrapper));
    if let Some(root) = &root {
        debug!("Stripping archive root folder '{}'", root.display());
    }

    fs::create_dir_all(output_dir).map_err(extraction_error)?;

    let mut written = 0;
    for (i, name) in names.iter().enumerate() {
        let mut entry = archive.by_index(i).map_err(extraction_error)?;
        let Some(name) = name else {
            warn!("Skipping archive entry with unsafe path '{}'", entry.name());
            continue;
        };
        let relative = match &root {
            Some(root) => name.strip_prefix(root).unwrap_or(name.as_path()),
            None => name.as_path(),
        };
        if relative.as_os_str().is_empty() {
            continue;
        }

        let target = output_dir.join(relative);
        log::trace!("Extracting {}", target.display());
        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(extraction_error)?;
        } else if is_symlink(entry.unix_mode()) {
            let mut link = String::new();
            entry.read_to_string(&mut link).map_err(extraction_error)?;
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(extraction_error)?;
            }
            create_symlink(&link, &target).map_err(extraction_error)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(extraction_error)?;
            }
            let mut out = File::create(&target).map_err(extraction_error)?;
            io::copy(&mut entry, &mut out).map_err(extraction_error)?;
            if let Some(mode) = entry.unix_mode() {
                set_mode(&target, mode).map_err(extraction_error)?;
            }
        }
        progress.inc(entry.size());
        written += 1;
    }
    progress.finish();

    Ok(written)
}

#[cfg(unix)]
fn set_mode(target: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(target, fs::Permissions::from_mode(mode & 0o7777))
}

#[cfg(not(unix))]
fn set_mode(_target: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn create_symlink(link: &str, target: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(link, target)
}

#[cfg(not(unix))]
fn create_symlink(link: &str, target: &Path) -> io::Result<()> {
    warn!("Skipping symbolic link '{}' -> '{}'", target.display(), link);
    Ok(())
}

/// Extracts `archive` into `output_dir` and deletes the archive file afterwards,
/// whether or not extraction succeeded. Partial output is left in place on failure.
///
/// # Errors
/// * `Error::ExtractionError` on decode or filesystem failure
pub fn extract_archive(
    archive: LocalArchive,
    output_dir: &Path,
    wrapper: Option<&str>,
    progress: &ProgressBar,
) -> Result<ExtractedTree> {
    let result = archive
        .open()
        .map_err(extraction_error)
        .and_then(|file| extract_zip(io::BufReader::new(file), output_dir, wrapper, progress));

    let path = archive.path().to_path_buf();
    if let Err(e) = archive.remove() {
        warn!("Failed to remove archive '{}': {}", path.display(), e);
    }

    let entries = result?;
    Ok(ExtractedTree { root: output_dir.to_path_buf(), entries })
}
