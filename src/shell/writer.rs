use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use super::block::{
    END_MARKER, START_MARKER, format_timestamp, locate_block, parse_assignments, render_block,
    splice_block,
};
use super::{EnvVars, ShellKind};
use crate::error::{CcsError, Result};

/// A shell startup file holding (or about to hold) the `ccs` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellEnvFile {
    path: PathBuf,
    shell: ShellKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub path: PathBuf,
    pub message: String,
}

/// The parsed `ccs` block of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBlock {
    pub vars: EnvVars,
    /// Raw text from the start marker through the end marker.
    pub section: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    MissingFile,
    MissingMarkers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Found(EnvBlock),
    NotFound(NotFound),
}

impl ShellEnvFile {
    pub fn new(path: impl Into<PathBuf>, shell: ShellKind) -> Self {
        Self {
            path: path.into(),
            shell,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn shell(&self) -> ShellKind {
        self.shell
    }

    /// Insert or replace the `ccs` block with `vars`.
    ///
    /// Filesystem and encoding failures come back as [`CcsError::EnvWrite`].
    pub fn write(&self, vars: &EnvVars, locale: &str) -> Result<WriteReport> {
        let timestamp = format_timestamp(&Local::now(), locale);
        let block = render_block(self.shell, vars, &timestamp);

        let existing = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(self.write_error(e)),
        };
        let replaced = locate_block(&existing, START_MARKER, END_MARKER).is_some();
        let updated = splice_block(&existing, &block, START_MARKER, END_MARKER);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        fs::write(&self.path, updated).map_err(|e| self.write_error(e))?;

        info!(
            path = %self.path.display(),
            shell = %self.shell,
            replaced,
            vars = vars.len(),
            "wrote environment block"
        );
        Ok(WriteReport {
            path: self.path.clone(),
            message: t!("shell.written", path = self.path.display()).to_string(),
        })
    }

    /// Read the `ccs` block back. A missing file or marker is a
    /// [`ReadOutcome::NotFound`], not an error.
    pub fn read(&self) -> Result<ReadOutcome> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(ReadOutcome::NotFound(NotFound::MissingFile));
            }
            Err(source) => {
                return Err(CcsError::EnvRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let Some(span) = locate_block(&content, START_MARKER, END_MARKER) else {
            debug!(path = %self.path.display(), "no ccs block present");
            return Ok(ReadOutcome::NotFound(NotFound::MissingMarkers));
        };
        let section = content[span].to_string();
        let vars = parse_assignments(self.shell, &section);
        Ok(ReadOutcome::Found(EnvBlock { vars, section }))
    }

    fn write_error(&self, source: std::io::Error) -> CcsError {
        CcsError::EnvWrite {
            path: self.path.clone(),
            source,
        }
    }
}
