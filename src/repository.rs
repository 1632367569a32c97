//! Repository references and the URL forms derived from them.

use crate::error::{Error, Result};
use url::Url;

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];
const GITHUB_API: &str = "https://api.github.com/repos";

/// Location of a template's source repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    url: Url,
}

impl Repository {
    /// Parses an HTTP(S) repository URL. A trailing `/` or `.git` is dropped.
    ///
    /// # Errors
    /// * `Error::AcquisitionError` if `s` is not an http or https URL
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
        let url = Url::parse(trimmed)
            .map_err(|e| Error::AcquisitionError(format!("invalid repository '{s}': {e}")))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(Error::AcquisitionError(format!(
                "unsupported repository scheme '{}' in '{s}'",
                url.scheme()
            )));
        }
        Ok(Self { url })
    }

    fn github_path(&self) -> Option<(&str, &str)> {
        let host = self.url.host_str()?;
        if !GITHUB_HOSTS.contains(&host) {
            return None;
        }
        let mut segments = self.url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let repo = segments.next()?;
        Some((owner, repo))
    }

    /// URL answering the repository metadata query, for hosts that have one.
    pub fn metadata_url(&self) -> Option<Url> {
        let (owner, repo) = self.github_path()?;
        Url::parse(&format!("{GITHUB_API}/{owner}/{repo}")).ok()
    }

    /// URL of the zip archive of `branch`.
    pub fn archive_url(&self, branch: &str) -> Result<Url> {
        let archive = format!("{}/archive/{}.zip", self.url.as_str().trim_end_matches('/'), branch);
        Url::parse(&archive)
            .map_err(|e| Error::AcquisitionError(format!("invalid archive url '{archive}': {e}")))
    }

    /// Folder hosted archive downloads wrap their content in: `<repo>-<branch>`, with
    /// `/` in the branch name replaced by `-`.
    pub fn archive_root(&self, branch: &str) -> Option<String> {
        let name = self.url.path_segments()?.filter(|s| !s.is_empty()).last()?;
        Some(format!("{}-{}", name, branch.replace('/', "-")))
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
