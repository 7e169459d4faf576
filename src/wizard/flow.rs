use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{ConfigDocument, ConfigStore, Settings};
use crate::error::Result;
use crate::shell::{ReadOutcome, ShellEnvFile, ShellKind, WriteReport};
use crate::validator::{KeyProber, validate_all};

use super::domain::{CurrentSummary, api_key_choices, model_choices, provider_choices};
use super::prompts::{Choice, Prompter, choose};
use super::state::{Flow, MenuAction, WizardState};
use super::view;

/// One interactive session over a loaded provider document.
///
/// The document is owned here for the session and written through to the
/// store after every change.
pub struct Wizard<P: Prompter> {
    store: ConfigStore,
    document: ConfigDocument,
    prompter: P,
    settings: Settings,
}

impl<P: Prompter> Wizard<P> {
    pub fn new(store: ConfigStore, document: ConfigDocument, prompter: P, settings: Settings) -> Self {
        Self {
            store,
            document,
            prompter,
            settings,
        }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Show the banner and current selection, then loop until the user exits.
    pub async fn run(&mut self) -> Result<()> {
        view::print_banner();
        view::print_current(&CurrentSummary::of(&self.document));

        let mut state = WizardState::Idle;
        while !state.is_terminal() {
            state = self.step(state).await?;
        }
        view::print_goodbye();
        Ok(())
    }

    /// Run one state. Failures are reported and lead back to the menu,
    /// except a broken terminal: no prompt can recover from that, so it ends
    /// the session with the error.
    pub async fn step(&mut self, state: WizardState) -> Result<WizardState> {
        debug!(?state, "wizard step");
        match self.dispatch(state).await {
            Ok(next) => Ok(next),
            Err(e) if e.is_prompt_failure() => {
                warn!(?state, error = %e, "prompt failed, ending session");
                Err(e)
            }
            Err(e) => {
                warn!(?state, error = %e, "wizard step failed");
                view::print_error(&e.to_string());
                Ok(WizardState::Idle)
            }
        }
    }

    async fn dispatch(&mut self, state: WizardState) -> Result<WizardState> {
        match state {
            WizardState::Idle => self.menu(),
            WizardState::SelectingProvider => self.select_provider(),
            WizardState::SelectingModel(flow) => self.select_model(flow),
            WizardState::SelectingApiKey(flow) => self.select_api_key(flow),
            WizardState::NextStep => self.next_step(),
            WizardState::Committing => self.commit(),
            WizardState::Viewing => self.view(),
            WizardState::ValidatingKeys => self.validate_keys().await,
            WizardState::Done => Ok(WizardState::Done),
        }
    }

    fn menu(&mut self) -> Result<WizardState> {
        let choices: Vec<Choice<MenuAction>> = MenuAction::ALL
            .iter()
            .map(|action| Choice::new(action.label(), *action))
            .collect();
        let picked = choose(
            &mut self.prompter,
            &t!("wizard.prompt.action"),
            &choices,
            None,
        )?;
        // No answer at the top level ends the session.
        Ok(picked.map_or(WizardState::Done, MenuAction::target))
    }

    fn select_provider(&mut self) -> Result<WizardState> {
        let choices = provider_choices(&self.document);
        if choices.is_empty() {
            view::print_error(&t!("wizard.provider.none"));
            return Ok(WizardState::Idle);
        }

        let current = self.document.current.provider.clone();
        let Some(id) = choose(
            &mut self.prompter,
            &t!("wizard.prompt.provider"),
            &choices,
            Some(&current),
        )?
        else {
            return Ok(WizardState::Idle);
        };

        if id == current {
            return Ok(WizardState::NextStep);
        }

        let provider = self.document.providers[&id].clone();
        self.document.current.switch_provider(&id, &provider);
        self.persist()?;
        info!(provider = %id, model = %self.document.current.model, "switched provider");
        view::print_success(&t!("wizard.provider.switched", name = provider.name));

        Ok(WizardState::SelectingModel(Flow::Cascade))
    }

    fn select_model(&mut self, flow: Flow) -> Result<WizardState> {
        let Some(provider) = self.document.current_provider() else {
            view::print_error(&t!("wizard.provider.missing"));
            return Ok(WizardState::Idle);
        };
        let provider_name = provider.name.clone();

        let stale = self.document.current.model.clone();
        if self.document.heal_model() {
            view::print_warning(&t!(
                "wizard.model.reset",
                model = stale,
                provider = provider_name,
                first = self.document.current.model
            ));
            self.persist()?;
        }

        let Some(provider) = self.document.current_provider() else {
            return Ok(WizardState::Idle);
        };
        let choices = model_choices(provider);
        if choices.is_empty() {
            view::print_error(&t!("wizard.model.none"));
            return Ok(WizardState::Idle);
        }

        let current = self.document.current.model.clone();
        let Some(model) = choose(
            &mut self.prompter,
            &t!("wizard.prompt.model"),
            &choices,
            Some(&current),
        )?
        else {
            return Ok(WizardState::Idle);
        };

        if model != current {
            self.document.current.model.clone_from(&model);
            self.persist()?;
            info!(%model, "switched model");
            view::print_success(&t!("wizard.model.switched", model = model));
        }

        Ok(match flow {
            Flow::Cascade => WizardState::SelectingApiKey(Flow::Cascade),
            Flow::Standalone => WizardState::NextStep,
        })
    }

    fn select_api_key(&mut self, flow: Flow) -> Result<WizardState> {
        let Some(provider) = self.document.current_provider() else {
            view::print_error(&t!("wizard.provider.missing"));
            return Ok(WizardState::Idle);
        };
        if provider.api_keys.is_empty() {
            view::print_error(&t!("wizard.api_key.none"));
            return Ok(WizardState::Idle);
        }

        if self.document.heal_api_key_index() {
            view::print_warning(&t!("wizard.api_key.reset"));
            self.persist()?;
        }

        let Some(provider) = self.document.current_provider() else {
            return Ok(WizardState::Idle);
        };
        let choices = api_key_choices(provider);
        if choices.is_empty() {
            view::print_error(&t!("wizard.api_key.none_usable"));
            return Ok(WizardState::Idle);
        }

        let current = self.document.current.api_key_index;
        let Some(index) = choose(
            &mut self.prompter,
            &t!("wizard.prompt.api_key"),
            &choices,
            Some(&current),
        )?
        else {
            return Ok(WizardState::Idle);
        };

        if index != current {
            let name = provider.api_keys[index].name.clone();
            self.document.current.api_key_index = index;
            self.persist()?;
            info!(index, "switched API key");
            view::print_success(&t!("wizard.api_key.switched", name = name));
        }

        Ok(match flow {
            // Completing the cascade always ends in a write attempt.
            Flow::Cascade => WizardState::Committing,
            Flow::Standalone => WizardState::NextStep,
        })
    }

    fn next_step(&mut self) -> Result<WizardState> {
        view::print_current(&CurrentSummary::of(&self.document));
        let answer = self
            .prompter
            .confirm(&t!("wizard.prompt.keep_editing"), false)?;
        Ok(match answer {
            Some(false) => WizardState::Committing,
            Some(true) | None => WizardState::Idle,
        })
    }

    fn commit(&mut self) -> Result<WizardState> {
        view::print_section(&t!("wizard.export.title"));
        // Gate before asking anything: an inconsistent document never reaches the prompt.
        self.document.validate_full()?;

        let Some(path) = self.ask_target_path()? else {
            return Ok(WizardState::Idle);
        };
        let confirmed = self.prompter.confirm(
            &t!("wizard.prompt.confirm_write", path = path.display()),
            true,
        )?;
        if confirmed != Some(true) {
            view::print_warning(&t!("wizard.export.cancelled"));
            return Ok(WizardState::Idle);
        }

        let vars = self.document.export_vars()?;
        let report = self.export_to(&path)?;
        view::print_export_report(&report.message, &vars, &report.path);
        Ok(WizardState::Done)
    }

    /// Validate, write the three variables to `path`, and remember the path.
    ///
    /// Nothing is written when the document fails full validation.
    pub fn export_to(&mut self, path: &Path) -> Result<WriteReport> {
        let vars = self.document.export_vars()?;
        let file = ShellEnvFile::new(path, ShellKind::for_path(path, self.settings.shell));
        let report = file.write(&vars, &self.settings.locale)?;
        self.remember_path(path)?;
        Ok(report)
    }

    fn view(&mut self) -> Result<WizardState> {
        view::print_section(&t!("wizard.view.title"));
        let Some(path) = self.ask_target_path()? else {
            return Ok(WizardState::Idle);
        };
        let file = ShellEnvFile::new(&path, ShellKind::for_path(&path, self.settings.shell));
        match file.read()? {
            ReadOutcome::Found(block) => {
                view::print_env_block(&block, &path);
                self.remember_path(&path)?;
            }
            ReadOutcome::NotFound(reason) => view::print_not_configured(&path, reason),
        }
        Ok(WizardState::Idle)
    }

    async fn validate_keys(&mut self) -> Result<WizardState> {
        view::print_section(&t!("wizard.validate.running"));
        let report = validate_all(&self.document, &KeyProber::new()).await;
        view::print_key_report(&report);
        Ok(WizardState::Idle)
    }

    pub fn default_target_path(&self) -> PathBuf {
        self.settings
            .export_path(self.document.last_config_path.as_deref())
    }

    fn ask_target_path(&mut self) -> Result<Option<PathBuf>> {
        let default = self.default_target_path();
        let answer = self.prompter.input(
            &t!("wizard.prompt.target_path"),
            &default.display().to_string(),
        )?;
        Ok(answer.map(|raw| {
            if raw.trim().is_empty() {
                default
            } else {
                self.settings.expand_home(&raw)
            }
        }))
    }

    fn remember_path(&mut self, path: &Path) -> Result<()> {
        let path = path.display().to_string();
        if self.document.last_config_path.as_deref() == Some(path.as_str()) {
            return Ok(());
        }
        self.document.last_config_path = Some(path);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.document)
    }
}

