use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::UserDirs;
use tracing::Level;

use crate::shell::ShellKind;

pub const DEFAULT_LOCALE: &str = "en";
pub const ZH_LOCALE: &str = "zh-CN";

/// Runtime settings resolved from the home directory and the environment.
///
/// Nothing here is persisted; the provider document lives at `config_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub home_dir: PathBuf,
    /// Provider document (`~/.claude/ccs-providers.json` by default).
    pub config_path: PathBuf,
    pub shell: ShellKind,
    /// UI and timestamp locale: `en` or `zh-CN`.
    pub locale: String,
    pub log_level: Level,
}

impl Settings {
    /// Resolve against the real home directory and process environment.
    pub fn resolve() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let mut settings = Self::for_home(&home);
        settings.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Defaults for a given home directory, ignoring the environment.
    pub fn for_home(home: &Path) -> Self {
        Self {
            home_dir: home.to_path_buf(),
            config_path: home.join(".claude").join("ccs-providers.json"),
            shell: ShellKind::Zsh,
            locale: DEFAULT_LOCALE.to_string(),
            log_level: Level::WARN,
        }
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Shell: SHELL
        self.shell = ShellKind::detect(var("SHELL").as_deref());

        // Config document: CCS_CONFIG
        if let Some(path) = var("CCS_CONFIG").filter(|p| !p.trim().is_empty()) {
            self.config_path = self.expand_home(&path);
        }

        // Locale: CCS_LOCALE, then LANG
        if let Some(locale) = var("CCS_LOCALE")
            .or_else(|| var("LANG"))
            .filter(|l| !l.is_empty())
        {
            self.locale = normalize_locale(&locale).to_string();
        }

        // Log level: CCS_LOG
        if let Some(level) = var("CCS_LOG") {
            if let Ok(level) = level.trim().parse::<Level>() {
                self.log_level = level;
            }
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.config_path = path;
        }
        self
    }

    /// Expand a leading `~` against this home directory.
    pub fn expand_home(&self, raw: &str) -> PathBuf {
        let home = self.home_dir.to_string_lossy().into_owned();
        PathBuf::from(shellexpand::tilde_with_context(raw.trim(), || Some(home)).as_ref())
    }

    /// Where exports go: the remembered path if any, else the shell's rc file.
    pub fn export_path(&self, remembered: Option<&str>) -> PathBuf {
        match remembered {
            Some(path) if !path.trim().is_empty() => self.expand_home(path),
            _ => self.shell.default_config_path(&self.home_dir),
        }
    }

    /// Make `locale` the active UI locale.
    pub fn apply_locale(&self) {
        rust_i18n::set_locale(&self.locale);
    }
}

/// Map `LANG`-style values (`zh_CN.UTF-8`, `en_US`) onto a supported locale.
pub fn normalize_locale(raw: &str) -> &'static str {
    if raw.trim().to_ascii_lowercase().starts_with("zh") {
        ZH_LOCALE
    } else {
        DEFAULT_LOCALE
    }
}
