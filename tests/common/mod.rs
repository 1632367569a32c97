#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use kiln::acquire::{ArchiveMetadata, ArchiveSource, ArchiveStream};
use kiln::error::{Error, Result};
use kiln::install::Installer;
use kiln::prompt::Prompter;
use kiln::repository::Repository;
use url::Url;
use zip::write::SimpleFileOptions;

/// Answers prompts from a script. `None` accepts the offered default.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Option<String>>>,
    pub messages: RefCell<Vec<String>>,
    pub initial_selections: RefCell<Vec<usize>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
            ..Default::default()
        }
    }

    fn next(&self, message: &str) -> Result<Option<String>> {
        self.messages.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::PromptError(format!("no scripted answer for '{message}'")))
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, message: &str, default: &str) -> Result<String> {
        Ok(self.next(message)?.unwrap_or_else(|| default.to_string()))
    }

    fn password(&self, message: &str) -> Result<String> {
        Ok(self.next(message)?.unwrap_or_default())
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Ok(match self.next(message)? {
            Some(answer) => answer == "y",
            None => default,
        })
    }

    fn select(&self, message: &str, options: &[String], initial: usize) -> Result<usize> {
        self.initial_selections.borrow_mut().push(initial);
        Ok(match self.next(message)? {
            Some(answer) => options.iter().position(|o| *o == answer).unwrap_or(initial),
            None => initial,
        })
    }
}

/// Serves one in-memory archive for every request.
pub struct MemorySource {
    pub archive: Vec<u8>,
    pub metadata: ArchiveMetadata,
    pub opened: RefCell<Vec<Url>>,
}

impl MemorySource {
    pub fn new(archive: Vec<u8>) -> Self {
        Self { archive, metadata: ArchiveMetadata::default(), opened: RefCell::new(Vec::new()) }
    }
}

impl ArchiveSource for MemorySource {
    fn metadata(&self, _repository: &Repository) -> Result<ArchiveMetadata> {
        Ok(self.metadata.clone())
    }

    fn open(&self, url: &Url) -> Result<ArchiveStream> {
        self.opened.borrow_mut().push(url.clone());
        Ok(ArchiveStream {
            reader: Box::new(Cursor::new(self.archive.clone())),
            total: Some(self.archive.len() as u64),
        })
    }
}

/// Records every install call.
#[derive(Default)]
pub struct RecordingInstaller {
    pub calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
    pub fail_on_call: Cell<Option<usize>>,
}

impl Installer for RecordingInstaller {
    fn install(&self, project_dir: &Path, packages: &[String]) -> Result<()> {
        let mut calls = self.calls.borrow_mut();
        calls.push((project_dir.to_path_buf(), packages.to_vec()));
        if self.fail_on_call.get() == Some(calls.len()) {
            return Err(Error::DependencyInstallError("install exited with status 1".into()));
        }
        Ok(())
    }
}

/// Builds a zip archive holding `files` (path, content). Paths ending in `/` are
/// directories.
pub fn zip_archive(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (path, content) in files {
        if path.ends_with('/') {
            writer.add_directory(*path, options).unwrap();
        } else {
            writer.start_file(*path, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Lists the names of all files in `dir` (non-recursive).
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
