//! Dependency installation through an external package manager.

use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::interpolate::interpolate;
use crate::resolver::VariableContext;

/// Installs packages into a project directory.
pub trait Installer {
    /// Installs `packages` into `project_dir`. An empty list installs the dependencies
    /// the project manifest already declares.
    fn install(&self, project_dir: &Path, packages: &[String]) -> Result<()>;
}

/// Runs `<program> install [packages...]` inside the project directory.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    program: String,
}

impl CommandInstaller {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }
}

impl Installer for CommandInstaller {
    fn install(&self, project_dir: &Path, packages: &[String]) -> Result<()> {
        debug!("Running '{} install {}' in {}", self.program, packages.join(" "), project_dir.display());
        let status = Command::new(&self.program)
            .arg("install")
            .args(packages)
            .current_dir(project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                Error::DependencyInstallError(format!("failed to run '{}': {}", self.program, e))
            })?;

        if !status.success() {
            return Err(Error::DependencyInstallError(format!(
                "'{} install' failed with status: {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// Installs the project's own dependencies, then the template's extra dependencies with
/// their placeholders interpolated against `context`.
///
/// # Errors
/// * `Error::DependencyInstallError` if either install fails; nothing is rolled back
pub fn install_dependencies(
    installer: &dyn Installer,
    project_dir: &Path,
    extra_dependencies: &[String],
    context: &VariableContext,
) -> Result<Vec<String>> {
    let extras: Vec<String> =
        extra_dependencies.iter().map(|d| interpolate(d, context)).collect();

    installer.install(project_dir, &[])?;
    installer.install(project_dir, &extras)?;
    Ok(extras)
}
