use std::fs;

use serde_json::json;

use ccs::shell::{ReadOutcome, ShellEnvFile, ShellKind};
use ccs::wizard::{Flow, WizardState};

use crate::fixtures::{Answer, Sandbox, ScriptedPrompter, document, path_answer, two_provider_json};

#[tokio::test]
async fn provider_change_cascades_into_export() {
    let sandbox = Sandbox::new(&document(two_provider_json()));
    let rc = sandbox.rc_path();
    let prompter = ScriptedPrompter::new([
        Answer::Select(Some(0)), // menu: select provider
        Answer::Select(Some(1)), // p2
        Answer::Select(Some(1)), // m2
        Answer::Select(Some(0)), // the only usable key, "b"
        path_answer(&rc),
        Answer::Confirm(Some(true)),
    ]);
    let mut wizard = sandbox.wizard(prompter);

    wizard.run().await.unwrap();

    let saved = sandbox.saved();
    assert_eq!(saved.current.provider, "p2");
    assert_eq!(saved.current.model, "m2");
    assert_eq!(saved.current.api_key_index, 1);
    assert_eq!(
        saved.last_config_path.as_deref(),
        Some(rc.display().to_string().as_str())
    );

    let ReadOutcome::Found(block) = ShellEnvFile::new(&rc, ShellKind::Zsh).read().unwrap() else {
        panic!("export did not write a block");
    };
    assert_eq!(block.vars["ANTHROPIC_BASE_URL"], "https://api.y.com/v1/");
    assert_eq!(block.vars["ANTHROPIC_AUTH_TOKEN"], "sk-real-secret-value");
    assert_eq!(block.vars["ANTHROPIC_MODEL"], "m2");
    assert_eq!(wizard.into_prompter().remaining(), 0);
}

#[tokio::test]
async fn provider_switch_resets_model_and_key_before_asking() {
    let mut value = two_provider_json();
    value["current"] = json!({"provider": "p2", "model": "m2", "apiKeyIndex": 1});
    let sandbox = Sandbox::new(&document(value));
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([Answer::Select(Some(0))]));

    let next = wizard.step(WizardState::SelectingProvider).await.unwrap();

    assert_eq!(next, WizardState::SelectingModel(Flow::Cascade));
    let saved = sandbox.saved();
    assert_eq!(&saved, wizard.document(), "every change is written through");
    assert_eq!(saved.current.provider, "p1");
    assert_eq!(saved.current.model, "m1");
    assert_eq!(saved.current.api_key_index, 0);
}

#[tokio::test]
async fn same_provider_goes_to_next_step_without_reset() {
    let mut value = two_provider_json();
    value["current"] = json!({"provider": "p2", "model": "m2", "apiKeyIndex": 1});
    let sandbox = Sandbox::new(&document(value));
    let before = fs::read_to_string(sandbox.store.path()).unwrap();
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([Answer::Select(Some(1))]));

    let next = wizard.step(WizardState::SelectingProvider).await.unwrap();

    assert_eq!(next, WizardState::NextStep);
    assert_eq!(fs::read_to_string(sandbox.store.path()).unwrap(), before);
    let prompter = wizard.into_prompter();
    assert_eq!(prompter.selects[0].1, 1, "current provider is preselected");
}

#[tokio::test]
async fn drifted_model_heals_to_first_before_the_prompt() {
    let mut value = two_provider_json();
    value["current"] = json!({"provider": "p2", "model": "m3", "apiKeyIndex": 1});
    let sandbox = Sandbox::new(&document(value));
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([Answer::Select(None)]));

    let next = wizard
        .step(WizardState::SelectingModel(Flow::Standalone))
        .await
        .unwrap();

    assert_eq!(next, WizardState::Idle);
    assert_eq!(sandbox.saved().current.model, "m1");
    let prompter = wizard.into_prompter();
    assert_eq!(prompter.selects[0], (vec!["m1".into(), "m2".into()], 0));
}

#[tokio::test]
async fn key_choice_stores_unfiltered_index() {
    let mut value = two_provider_json();
    value["current"] = json!({"provider": "p2", "model": "m1", "apiKeyIndex": 0});
    let sandbox = Sandbox::new(&document(value));
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([Answer::Select(Some(0))]));

    let next = wizard
        .step(WizardState::SelectingApiKey(Flow::Standalone))
        .await
        .unwrap();

    assert_eq!(next, WizardState::NextStep);
    assert_eq!(sandbox.saved().current.api_key_index, 1);
    let prompter = wizard.into_prompter();
    assert_eq!(prompter.selects[0].0, vec!["b (sk-rea...alue)".to_string()]);
}

#[tokio::test]
async fn out_of_range_key_index_heals_to_zero() {
    let mut value = two_provider_json();
    value["current"] = json!({"provider": "p1", "model": "m1", "apiKeyIndex": 4});
    let sandbox = Sandbox::new(&document(value));
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([Answer::Select(None)]));

    let next = wizard
        .step(WizardState::SelectingApiKey(Flow::Standalone))
        .await
        .unwrap();

    assert_eq!(next, WizardState::Idle);
    assert_eq!(sandbox.saved().current.api_key_index, 0);
}

#[tokio::test]
async fn declining_to_keep_editing_moves_to_export() {
    let sandbox = Sandbox::new(&document(two_provider_json()));
    let mut wizard = sandbox.wizard(ScriptedPrompter::new([
        Answer::Confirm(Some(false)),
        Answer::Confirm(Some(true)),
    ]));

    assert_eq!(
        wizard.step(WizardState::NextStep).await.unwrap(),
        WizardState::Committing
    );
    assert_eq!(
        wizard.step(WizardState::NextStep).await.unwrap(),
        WizardState::Idle
    );
}
