use std::fs;

use serde_json::json;

use ccs::error::CcsError;
use ccs::wizard::WizardState;

use crate::fixtures::{Sandbox, ScriptedPrompter, document, two_provider_json};

const EXISTING_RC: &str = "alias ll='ls -l'\n";

fn sandbox_with_current(current: serde_json::Value) -> Sandbox {
    let mut value = two_provider_json();
    value["current"] = current;
    let sandbox = Sandbox::new(&document(value));
    fs::write(sandbox.rc_path(), EXISTING_RC).unwrap();
    sandbox
}

#[test]
fn out_of_range_key_index_refuses_to_write() {
    let sandbox = sandbox_with_current(json!({"provider": "p1", "model": "m1", "apiKeyIndex": 1}));
    let mut wizard = sandbox.wizard(ScriptedPrompter::default());

    let err = wizard.export_to(&sandbox.rc_path()).unwrap_err();

    assert!(matches!(err, CcsError::ConfigInvalid(_)), "got {err:?}");
    assert_eq!(fs::read_to_string(sandbox.rc_path()).unwrap(), EXISTING_RC);
    assert!(sandbox.saved().last_config_path.is_none());
}

#[test]
fn unknown_model_refuses_to_write() {
    let sandbox =
        sandbox_with_current(json!({"provider": "p2", "model": "gone", "apiKeyIndex": 1}));
    let mut wizard = sandbox.wizard(ScriptedPrompter::default());

    let err = wizard.export_to(&sandbox.rc_path()).unwrap_err();

    assert!(matches!(err, CcsError::ConfigInvalid(_)), "got {err:?}");
    assert_eq!(fs::read_to_string(sandbox.rc_path()).unwrap(), EXISTING_RC);
}

#[tokio::test]
async fn commit_step_reports_and_returns_to_menu_without_prompting() {
    let sandbox = sandbox_with_current(json!({"provider": "p1", "model": "m1", "apiKeyIndex": 3}));
    // No scripted answers: any prompt would panic.
    let mut wizard = sandbox.wizard(ScriptedPrompter::default());

    assert_eq!(
        wizard.step(WizardState::Committing).await.unwrap(),
        WizardState::Idle
    );
    assert_eq!(fs::read_to_string(sandbox.rc_path()).unwrap(), EXISTING_RC);
}

#[test]
fn valid_export_remembers_the_path_once() {
    let sandbox = sandbox_with_current(json!({"provider": "p1", "model": "m1", "apiKeyIndex": 0}));
    let mut wizard = sandbox.wizard(ScriptedPrompter::default());

    let report = wizard.export_to(&sandbox.rc_path()).unwrap();

    assert_eq!(report.path, sandbox.rc_path());
    let content = fs::read_to_string(sandbox.rc_path()).unwrap();
    assert!(content.starts_with(EXISTING_RC));
    assert!(content.contains("export ANTHROPIC_MODEL=\"m1\""));
    assert_eq!(
        wizard.default_target_path(),
        sandbox.rc_path(),
        "remembered path becomes the default"
    );
}
