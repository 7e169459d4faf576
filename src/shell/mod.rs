//! Shell startup file integration.
//!
//! - [`ShellKind`] classifies the user's shell and picks a default rc file.
//! - [`block`] renders, splices and parses the `ccs`-owned region.
//! - [`writer`] applies that region to a file on disk.

pub mod block;
pub mod writer;

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

pub use block::{END_MARKER, START_MARKER};
pub use writer::{EnvBlock, NotFound, ReadOutcome, ShellEnvFile, WriteReport};

/// Ordered `KEY -> value` pairs written into the block.
pub type EnvVars = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShellKind {
    #[default]
    Zsh,
    Bash,
    Fish,
}

impl ShellKind {
    /// Classify a `$SHELL`-style path. Unknown or missing shells are zsh.
    pub fn detect(shell_path: Option<&str>) -> Self {
        let Some(path) = shell_path else {
            return Self::Zsh;
        };
        let name = path
            .trim()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .trim_start_matches('-');
        match name {
            "bash" => Self::Bash,
            "fish" => Self::Fish,
            _ => Self::Zsh,
        }
    }

    /// rc file `ccs` writes to when the user does not pick one.
    pub fn default_config_path(self, home: &Path) -> PathBuf {
        match self {
            Self::Zsh => home.join(".zshrc"),
            Self::Bash => home.join(".bashrc"),
            Self::Fish => home
                .join(".config")
                .join("fish")
                .join("conf.d")
                .join("ccs.fish"),
        }
    }

    /// Fish files use fish syntax whatever `$SHELL` says.
    pub fn for_path(path: &Path, fallback: Self) -> Self {
        if path.extension().is_some_and(|ext| ext == "fish") {
            Self::Fish
        } else {
            fallback
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zsh => "zsh",
            Self::Bash => "bash",
            Self::Fish => "fish",
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
