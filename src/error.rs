use std::path::PathBuf;

use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `ccs`.
///
/// The config store and the shell writer return these so the wizard can decide
/// whether a failure is fatal (initial load) or only aborts the current step.
/// The binary's outer layer keeps using `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum CcsError {
    // ── Config document ─────────────────────────────────────────────────
    #[error("config file {path} is unreadable: {reason}")]
    ConfigUnreadable { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("failed to write config file {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Shell rc file ───────────────────────────────────────────────────
    #[error("failed to write environment block to {path}: {source}")]
    EnvWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read environment block from {path}: {source}")]
    EnvRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Terminal prompts ────────────────────────────────────────────────
    #[error("prompt failed: {0}")]
    Prompt(String),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CcsError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::ConfigInvalid(reason.into())
    }

    /// Errors that make the loaded document unusable, as opposed to a failed
    /// write or a prompt hiccup the wizard can recover from.
    pub fn is_config_fault(&self) -> bool {
        matches!(self, Self::ConfigUnreadable { .. } | Self::ConfigInvalid(_))
    }

    /// The terminal itself could not be prompted (not a TTY, closed stdin).
    pub fn is_prompt_failure(&self) -> bool {
        matches!(self, Self::Prompt(_))
    }
}

impl From<dialoguer::Error> for CcsError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, CcsError>;
