//! Archive acquisition.
//! Streams a packaged template into a temporary file in the working directory while
//! advancing a progress bar. The file is synced to disk before it is handed to
//! extraction.

use indicatif::ProgressBar;
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use url::Url;

use crate::constants::ARCHIVE_PREFIX;
use crate::error::{Error, Result};
use crate::repository::Repository;

const CHUNK_SIZE: usize = 16 * 1024;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Best-effort facts about a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveMetadata {
    /// Declared size in bytes, used for progress display only
    pub size: Option<u64>,
    pub default_branch: Option<String>,
}

/// An open archive download.
pub struct ArchiveStream {
    pub reader: Box<dyn Read>,
    /// Length announced by the transport, if any
    pub total: Option<u64>,
}

/// Remote store of packaged templates.
pub trait ArchiveSource {
    /// Queries repository metadata. Sources without a metadata service return the default.
    fn metadata(&self, repository: &Repository) -> Result<ArchiveMetadata>;

    /// Opens a byte stream for the archive at `url`.
    fn open(&self, url: &Url) -> Result<ArchiveStream>;
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    /// Repository size in KiB
    size: Option<u64>,
    default_branch: Option<String>,
}

/// Downloads archives over HTTP(S).
pub struct HttpArchiveSource {
    client: reqwest::blocking::Client,
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::AcquisitionError(e.to_string())
}

impl HttpArchiveSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(None::<Duration>)
            .build()
            .map_err(transport_error)?;
        Ok(Self { client })
    }
}

impl ArchiveSource for HttpArchiveSource {
    fn metadata(&self, repository: &Repository) -> Result<ArchiveMetadata> {
        let Some(url) = repository.metadata_url() else {
            debug!("No metadata service for {}", repository);
            return Ok(ArchiveMetadata::default());
        };
        debug!("Querying metadata from {}", url);
        let info: RepositoryInfo = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(transport_error)?;
        Ok(ArchiveMetadata {
            size: info.size.map(|kib| kib * 1024),
            default_branch: info.default_branch,
        })
    }

    fn open(&self, url: &Url) -> Result<ArchiveStream> {
        debug!("Opening {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(transport_error)?;
        let total = response.content_length();
        Ok(ArchiveStream { reader: Box::new(response), total })
    }
}

/// An archive fully written to local storage. Dropping it removes the file.
#[derive(Debug)]
pub struct LocalArchive {
    file: NamedTempFile,
    len: u64,
}

impl LocalArchive {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Opens a fresh read handle on the archive.
    pub fn open(&self) -> std::io::Result<File> {
        self.file.reopen()
    }

    /// Deletes the archive file.
    pub fn remove(self) -> std::io::Result<()> {
        self.file.close()
    }
}

/// Copies `reader` into `writer` chunk by chunk, advancing `progress` by each chunk size.
/// Returns the number of bytes copied.
pub fn copy_with_progress<R: Read + ?Sized, W: Write>(
    reader: &mut R,
    writer: &mut W,
    progress: &ProgressBar,
) -> std::io::Result<u64> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut copied = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        copied += n as u64;
        progress.inc(n as u64);
    }
    Ok(copied)
}

/// Writes `stream` into a new temporary file in `working_dir`.
///
/// The returned archive has been flushed and synced; its content is the complete
/// stream byte for byte. On any stream or write failure the partial file is removed.
///
/// # Errors
/// * `Error::AcquisitionError` on stream or write failure
pub fn store_archive(
    mut stream: ArchiveStream,
    working_dir: &Path,
    progress: &ProgressBar,
) -> Result<LocalArchive> {
    let acquisition_error = |e: std::io::Error| Error::AcquisitionError(e.to_string());

    let mut file = tempfile::Builder::new()
        .prefix(ARCHIVE_PREFIX)
        .suffix(".zip")
        .tempfile_in(working_dir)
        .map_err(acquisition_error)?;

    let len = {
        let mut writer = BufWriter::new(file.as_file_mut());
        let len = copy_with_progress(&mut *stream.reader, &mut writer, progress)
            .map_err(acquisition_error)?;
        writer.flush().map_err(acquisition_error)?;
        len
    };
    file.as_file().sync_all().map_err(acquisition_error)?;
    progress.finish();

    debug!("Stored {} bytes in {}", len, file.path().display());
    Ok(LocalArchive { file, len })
}

/// Downloads `repository` at `branch` into a temporary file in `working_dir`.
///
/// # Arguments
/// * `declared_size` - Fallback progress total when the transport announces none
/// * `make_progress` - Builds the progress bar once the total is known
pub fn download_archive(
    source: &dyn ArchiveSource,
    repository: &Repository,
    branch: &str,
    declared_size: Option<u64>,
    working_dir: &Path,
    make_progress: impl FnOnce(Option<u64>) -> ProgressBar,
) -> Result<LocalArchive> {
    let url = repository.archive_url(branch)?;
    let stream = source.open(&url)?;
    let progress = make_progress(stream.total.or(declared_size));
    store_archive(stream, working_dir, &progress)
}
