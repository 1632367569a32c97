//! Provisioning pipeline.
//! Runs the stages of a provisioning run strictly in order. Each stage starts only
//! after the previous one returned successfully; the first fatal error moves the
//! pipeline to [`Stage::Failed`] and no later stage runs.

use dialoguer::console::style;
use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::acquire::{download_archive, ArchiveSource};
use crate::catalog::TemplateDescriptor;
use crate::constants::{APP_NAME, DEFAULT_BRANCH};
use crate::error::{Error, Result};
use crate::extract::extract_archive;
use crate::install::{install_dependencies, Installer};
use crate::progress::ProgressFactory;
use crate::prompt::Prompter;
use crate::repository::Repository;
use crate::resolver::{resolve_variables, VariableContext};
use crate::scaffold::{create_directories, ScaffoldReport};
use crate::substitute::{substitute_tree, SubstitutionReport};

/// States of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Resolving,
    Acquiring,
    Extracting,
    Substituting,
    Scaffolding,
    InstallingDeps,
    Done,
    Failed,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct Provisioned {
    pub project_dir: PathBuf,
    pub context: VariableContext,
    pub substitution: SubstitutionReport,
    pub scaffold: ScaffoldReport,
    pub extra_dependencies: Vec<String>,
}

/// Returns the resolved project directory name, which must be a single non-empty path
/// segment. Surrounding whitespace is dropped.
fn project_name(template: &TemplateDescriptor, context: &VariableContext) -> Result<String> {
    let name = context.get(APP_NAME).map(str::trim).unwrap_or_default();
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name.to_string()),
        _ => Err(Error::ValidationError(format!(
            "template '{}' must resolve {} to a plain directory name, got '{}'",
            template.name, APP_NAME, name
        ))),
    }
}

fn announce(message: &str) {
    println!("{}", style(message).bold());
}

fn directory_warning(failure: &Error) -> String {
    style(format!("warning: {failure}")).yellow().to_string()
}

/// Drives one template through every stage.
pub struct Pipeline<'a> {
    prompt: &'a dyn Prompter,
    source: &'a dyn ArchiveSource,
    installer: &'a dyn Installer,
    working_dir: PathBuf,
    branch: Option<String>,
    progress: ProgressFactory,
    stage: Stage,
    history: Vec<Stage>,
}

impl<'a> Pipeline<'a> {
    pub fn new<P: AsRef<Path>>(
        prompt: &'a dyn Prompter,
        source: &'a dyn ArchiveSource,
        installer: &'a dyn Installer,
        working_dir: P,
    ) -> Self {
        Self {
            prompt,
            source,
            installer,
            working_dir: working_dir.as_ref().to_path_buf(),
            branch: None,
            progress: ProgressFactory::hidden(),
            stage: Stage::Idle,
            history: vec![Stage::Idle],
        }
    }

    /// Downloads `branch` instead of the repository default branch.
    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_progress(mut self, visible: bool) -> Self {
        self.progress = ProgressFactory::new(visible);
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage entered so far, starting with [`Stage::Idle`].
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    fn enter(&mut self, stage: Stage) {
        debug!("Pipeline stage: {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
        self.history.push(stage);
    }

    /// Provisions `template` under the working directory.
    ///
    /// # Errors
    /// Returns the error of the first failing stage; the pipeline is left in
    /// [`Stage::Failed`].
    pub fn run(&mut self, template: &TemplateDescriptor) -> Result<Provisioned> {
        if self.stage != Stage::Idle {
            return Err(Error::ValidationError(format!(
                "pipeline already ran and is in state {:?}",
                self.stage
            )));
        }
        match self.provision(template) {
            Ok(provisioned) => {
                self.enter(Stage::Done);
                Ok(provisioned)
            }
            Err(e) => {
                self.enter(Stage::Failed);
                Err(e)
            }
        }
    }

    fn provision(&mut self, template: &TemplateDescriptor) -> Result<Provisioned> {
        self.enter(Stage::Resolving);
        let mut context = resolve_variables(template, self.prompt)?;
        let app_name = project_name(template, &context)?;
        let project_dir = self.working_dir.join(&app_name);
        context.insert(APP_NAME, app_name);
        println!();

        self.enter(Stage::Acquiring);
        let repository = Repository::parse(&template.repository)?;
        let metadata = self.source.metadata(&repository)?;
        let branch = self
            .branch
            .clone()
            .or(metadata.default_branch)
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        announce(&format!("downloading {repository}"));
        let progress = self.progress;
        let archive = download_archive(
            self.source,
            &repository,
            &branch,
            metadata.size,
            &self.working_dir,
            |total| progress.download(total),
        )?;

        self.enter(Stage::Extracting);
        announce(&format!("\nextracting into {}", project_dir.display()));
        let bar = self.progress.extraction(Some(archive.len()));
        let wrapper = repository.archive_root(&branch);
        let tree = extract_archive(archive, &project_dir, wrapper.as_deref(), &bar)?;
        debug!("Extracted {} entries into {}", tree.entries, tree.root.display());

        self.enter(Stage::Substituting);
        announce("\nadjusting template...");
        let substitution = substitute_tree(&tree.root, &context)?;
        debug!(
            "Adjusted {} of {} files",
            substitution.files_rewritten, substitution.files_scanned
        );

        self.enter(Stage::Scaffolding);
        announce("\ncreating directories...");
        let scaffold = create_directories(&tree.root, &template.create_directories, &context);
        for failure in &scaffold.failed {
            println!("{}", directory_warning(failure));
        }

        self.enter(Stage::InstallingDeps);
        announce("\ninstalling dependencies...\n");
        let extra_dependencies = install_dependencies(
            self.installer,
            &tree.root,
            &template.extra_dependencies,
            &context,
        )?;

        Ok(Provisioned {
            project_dir: tree.root,
            context,
            substitution,
            scaffold,
            extra_dependencies,
        })
    }
}
