//! Templates catalog handling.
//! A catalog is an ordered list of template descriptors stored as JSON (or YAML). Each
//! descriptor names the repository holding the packaged template and the variables the
//! user must supply before the template can be provisioned.

use crate::constants::{CATALOG_FILES, DEFAULT_GENERATED_LENGTH};
use crate::error::{Error, Result};
use crate::generate::Charset;
use crate::interpolate::is_identifier;
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Kind of answer a prompted variable expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    #[default]
    Text,
    Password,
    Number,
    Confirm,
    Select,
}

/// A variable declared by a template.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VariableSpec {
    /// Asked to the user
    Prompted {
        name: String,
        prompt: String,
        #[serde(default, rename = "type")]
        kind: VariableType,
        #[serde(default)]
        options: Vec<String>,
        #[serde(default)]
        default: Option<serde_json::Value>,
        #[serde(default)]
        required: bool,
    },
    /// Produced randomly without user interaction
    Generated {
        name: String,
        generate: Charset,
        #[serde(default = "default_length")]
        length: usize,
    },
}

fn default_length() -> usize {
    DEFAULT_GENERATED_LENGTH
}

impl VariableSpec {
    pub fn name(&self) -> &str {
        match self {
            VariableSpec::Prompted { name, .. } | VariableSpec::Generated { name, .. } => name,
        }
    }
}

/// One catalog record.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDescriptor {
    pub name: String,
    pub repository: String,
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
    #[serde(default)]
    pub create_directories: Vec<String>,
    #[serde(default)]
    pub extra_dependencies: Vec<String>,
}

impl TemplateDescriptor {
    /// Checks the structural invariants a descriptor must hold before it can be provisioned.
    ///
    /// # Errors
    /// * `Error::CatalogError` on duplicate or malformed variable names, or on a select
    ///   variable without options
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for variable in &self.variables {
            let name = variable.name();
            if !is_identifier(name) {
                return Err(Error::CatalogError(format!(
                    "template '{}' declares an invalid variable name '{}'",
                    self.name, name
                )));
            }
            if !seen.insert(name) {
                return Err(Error::CatalogError(format!(
                    "template '{}' declares variable '{}' more than once",
                    self.name, name
                )));
            }
            if let VariableSpec::Prompted { kind: VariableType::Select, options, .. } = variable {
                if options.is_empty() {
                    return Err(Error::CatalogError(format!(
                        "select variable '{}' of template '{}' has no options",
                        name, self.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Ordered collection of template descriptors.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: Vec<TemplateDescriptor>,
}

impl Catalog {
    /// Parses catalog content, trying JSON first and YAML second.
    ///
    /// # Errors
    /// * `Error::CatalogError` if the content is neither valid JSON nor valid YAML, or if
    ///   any descriptor fails validation
    pub fn parse(content: &str) -> Result<Self> {
        let templates: Vec<TemplateDescriptor> = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::CatalogError(format!("Invalid catalog format: {e}")))?,
        };

        let mut names = HashSet::new();
        for template in &templates {
            if !names.insert(template.name.as_str()) {
                return Err(Error::CatalogError(format!(
                    "template '{}' is listed more than once",
                    template.name
                )));
            }
            template.validate()?;
        }

        Ok(Self { templates })
    }

    /// Loads the catalog from `path`, or from the first existing default catalog file in
    /// `working_dir` when no path is given.
    pub fn load(path: Option<&Path>, working_dir: &Path) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => find_catalog_file(working_dir, &CATALOG_FILES)?,
        };
        debug!("Loading catalog from {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::CatalogError(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Looks up a template by its unique name.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` naming the requested template
    pub fn find(&self, name: &str) -> Result<&TemplateDescriptor> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::TemplateNotFound { name: name.to_string() })
    }

    pub fn templates(&self) -> &[TemplateDescriptor] {
        &self.templates
    }
}

fn find_catalog_file(dir: &Path, candidates: &[&str]) -> Result<PathBuf> {
    candidates
        .iter()
        .map(|file| dir.join(file))
        .find(|path| path.exists())
        .ok_or_else(|| {
            Error::CatalogError(format!(
                "No catalog file found (tried: {})",
                candidates.join(", ")
            ))
        })
}
