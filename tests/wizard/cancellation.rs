use std::fs;
use std::time::Duration;

use ccs::config::ConfigStore;
use ccs::error::{CcsError, Result};
use ccs::wizard::{Flow, Prompter, Wizard, WizardState};

use crate::fixtures::{Answer, Sandbox, ScriptedPrompter, document, path_answer, two_provider_json};

#[tokio::test]
async fn cancelled_provider_prompt_returns_to_menu_then_exits() {
    let sandbox = Sandbox::new(&document(two_provider_json()));
    let before = fs::read_to_string(sandbox.store.path()).unwrap();
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([
        Answer::Select(Some(0)), // menu: select provider
        Answer::Select(None),    // back out
        Answer::Select(None),    // back out of the menu itself
    ]));

    wizard.run().await.unwrap();

    assert_eq!(fs::read_to_string(sandbox.store.path()).unwrap(), before);
    assert_eq!(wizard.into_prompter().remaining(), 0);
}

#[tokio::test]
async fn cancelled_cascade_keeps_only_the_provider_reset() {
    let sandbox = Sandbox::new(&document(two_provider_json()));
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([
        Answer::Select(Some(1)), // p2
        Answer::Select(None),    // back out of the model prompt
    ]));

    let next = wizard.step(WizardState::SelectingProvider).await.unwrap();
    assert_eq!(next, WizardState::SelectingModel(Flow::Cascade));
    assert_eq!(wizard.step(next).await.unwrap(), WizardState::Idle);

    let saved = sandbox.saved();
    assert_eq!(saved.current.provider, "p2");
    assert_eq!(saved.current.model, "m1");
    assert_eq!(saved.current.api_key_index, 0);
}

#[tokio::test]
async fn cancelled_path_prompt_writes_nothing() {
    let sandbox = Sandbox::new(&document(two_provider_json()));
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([Answer::Input(None)]));

    assert_eq!(
        wizard.step(WizardState::Committing).await.unwrap(),
        WizardState::Idle
    );
    assert!(!sandbox.rc_path().exists());
}

#[tokio::test]
async fn declined_confirmation_writes_nothing() {
    let sandbox = Sandbox::new(&document(two_provider_json()));
    let rc = sandbox.rc_path();
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([
        path_answer(&rc),
        Answer::Confirm(Some(false)),
    ]));

    assert_eq!(
        wizard.step(WizardState::Committing).await.unwrap(),
        WizardState::Idle
    );
    assert!(!rc.exists());
    assert!(sandbox.saved().last_config_path.is_none());
}

#[tokio::test]
async fn view_never_changes_the_selection() {
    let sandbox = Sandbox::new(&document(two_provider_json()));
    let rc = sandbox.rc_path();
    let mut exporter = sandbox.wizard(ScriptedPrompter::default());
    exporter.export_to(&rc).unwrap();

    let mut wizard = sandbox.wizard(ScriptedPrompter::new([path_answer(&rc)]));
    assert_eq!(
        wizard.step(WizardState::Viewing).await.unwrap(),
        WizardState::Idle
    );

    let saved = sandbox.saved();
    assert_eq!(saved.current.provider, "p1");
    assert_eq!(saved.current.model, "m1");
    assert_eq!(
        saved.last_config_path.as_deref(),
        Some(rc.display().to_string().as_str())
    );
}

/// A terminal that cannot be prompted at all, like stdin not being a TTY.
struct BrokenTerminal {
    calls: usize,
}

impl BrokenTerminal {
    fn fail<T>(&mut self) -> Result<T> {
        self.calls += 1;
        Err(CcsError::Prompt("IO error: not a terminal".into()))
    }
}

impl Prompter for BrokenTerminal {
    fn select(&mut self, _: &str, _: &[String], _: usize) -> Result<Option<usize>> {
        self.fail()
    }

    fn confirm(&mut self, _: &str, _: bool) -> Result<Option<bool>> {
        self.fail()
    }

    fn input(&mut self, _: &str, _: &str) -> Result<Option<String>> {
        self.fail()
    }
}

fn broken_wizard(sandbox: &Sandbox) -> Wizard<BrokenTerminal> {
    Wizard::new(
        ConfigStore::new(sandbox.store.path()),
        sandbox.saved(),
        BrokenTerminal { calls: 0 },
        sandbox.settings.clone(),
    )
}

#[tokio::test]
async fn unusable_terminal_ends_the_session_with_an_error() {
    let sandbox = Sandbox::new(&document(two_provider_json()));
    let mut wizard = broken_wizard(&sandbox);

    let outcome = tokio::time::timeout(Duration::from_secs(5), wizard.run())
        .await
        .expect("wizard loop must stop when the menu cannot be shown");

    assert!(matches!(outcome, Err(CcsError::Prompt(_))), "got {outcome:?}");
    assert_eq!(wizard.into_prompter().calls, 1);
}

#[tokio::test]
async fn prompt_failure_inside_a_step_is_not_swallowed() {
    let sandbox = Sandbox::new(&document(two_provider_json()));
    let before = fs::read_to_string(sandbox.store.path()).unwrap();
    let mut wizard = broken_wizard(&sandbox);

    let err = wizard
        .step(WizardState::SelectingProvider)
        .await
        .unwrap_err();

    assert!(err.is_prompt_failure());
    assert_eq!(fs::read_to_string(sandbox.store.path()).unwrap(), before);
}
