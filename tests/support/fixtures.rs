#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

use ccs::config::{ConfigDocument, ConfigStore, Settings};
use ccs::error::Result;
use ccs::wizard::{Prompter, Wizard};

/// `p1` is fully exportable; `p2` has a blank key ahead of its only usable one.
pub fn two_provider_json() -> Value {
    json!({
        "providers": {
            "p1": {
                "name": "Provider One",
                "baseUrl": "https://api.x.com/",
                "models": ["m1"],
                "apiKeys": [{"name": "k1", "key": "sk-aaaaaaaaaaaaaaaaaaaa"}]
            },
            "p2": {
                "name": "Provider Two",
                "baseUrl": "https://api.y.com/v1/",
                "models": ["m1", "m2"],
                "apiKeys": [
                    {"name": "a", "key": ""},
                    {"name": "b", "key": "sk-real-secret-value"}
                ]
            }
        },
        "current": {"provider": "p1", "model": "m1", "apiKeyIndex": 0}
    })
}

pub fn document(value: Value) -> ConfigDocument {
    ConfigDocument::from_value(value).unwrap()
}

/// Temp home holding a saved provider document.
pub struct Sandbox {
    pub home: TempDir,
    pub store: ConfigStore,
    pub settings: Settings,
}

impl Sandbox {
    pub fn new(doc: &ConfigDocument) -> Self {
        let home = TempDir::new().unwrap();
        let settings = Settings::for_home(home.path());
        let store = ConfigStore::new(&settings.config_path);
        store.save(doc).unwrap();
        Self {
            home,
            store,
            settings,
        }
    }

    pub fn rc_path(&self) -> std::path::PathBuf {
        self.home.path().join(".zshrc")
    }

    pub fn wizard(&self, prompter: ScriptedPrompter) -> Wizard<ScriptedPrompter> {
        let document = self.store.load().unwrap();
        Wizard::new(
            ConfigStore::new(self.store.path()),
            document,
            prompter,
            self.settings.clone(),
        )
    }

    pub fn saved(&self) -> ConfigDocument {
        self.store.load().unwrap()
    }
}

pub fn path_answer(path: &Path) -> Answer {
    Answer::Input(Some(path.display().to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Select(Option<usize>),
    Confirm(Option<bool>),
    Input(Option<String>),
}

/// Replays a fixed list of answers and records what was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Items and preselected position of every select prompt, in order.
    pub selects: Vec<(Vec<String>, usize)>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            selects: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, message: &str) -> Answer {
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for {message:?}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, items: &[String], default: usize) -> Result<Option<usize>> {
        self.selects.push((items.to_vec(), default));
        match self.next(message) {
            Answer::Select(answer) => Ok(answer),
            other => panic!("expected a select answer for {message:?}, got {other:?}"),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<Option<bool>> {
        match self.next(message) {
            Answer::Confirm(answer) => Ok(answer),
            other => panic!("expected a confirm answer for {message:?}, got {other:?}"),
        }
    }

    fn input(&mut self, message: &str, _default: &str) -> Result<Option<String>> {
        match self.next(message) {
            Answer::Input(answer) => Ok(answer),
            other => panic!("expected an input answer for {message:?}, got {other:?}"),
        }
    }
}
