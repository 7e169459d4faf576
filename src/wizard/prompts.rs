use dialoguer::{Confirm, Input, Select};

use crate::error::Result;

/// One labeled option whose `value` is what the wizard acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// The interactive capabilities the wizard needs.
///
/// Every method returns `Ok(None)` when the user backs out (Esc, `q`,
/// Ctrl-C inside a line prompt).
pub trait Prompter {
    fn select(&mut self, message: &str, items: &[String], default: usize) -> Result<Option<usize>>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>>;

    fn input(&mut self, message: &str, default: &str) -> Result<Option<String>>;
}

/// Ask the user to pick one of `choices`, preselecting `current` when present.
pub fn choose<P, T>(
    prompter: &mut P,
    message: &str,
    choices: &[Choice<T>],
    current: Option<&T>,
) -> Result<Option<T>>
where
    P: Prompter + ?Sized,
    T: Clone + PartialEq,
{
    let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
    let default = current
        .and_then(|cur| choices.iter().position(|c| &c.value == cur))
        .unwrap_or(0);
    let picked = prompter.select(message, &labels, default)?;
    Ok(picked
        .and_then(|idx| choices.get(idx))
        .map(|c| c.value.clone()))
}

/// `dialoguer`-backed prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, items: &[String], default: usize) -> Result<Option<usize>> {
        let picked = Select::new()
            .with_prompt(format!("  {message}"))
            .items(items)
            .default(default.min(items.len().saturating_sub(1)))
            .interact_opt();
        interrupted_as_none(picked)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>> {
        let answer = Confirm::new()
            .with_prompt(format!("  {message}"))
            .default(default)
            .interact_opt();
        interrupted_as_none(answer)
    }

    fn input(&mut self, message: &str, default: &str) -> Result<Option<String>> {
        let answer = Input::<String>::new()
            .with_prompt(format!("  {message}"))
            .default(default.to_string())
            .interact_text()
            .map(Some);
        interrupted_as_none(answer)
    }
}

/// Ctrl-C inside a prompt is a cancel, like Esc; other failures are errors.
fn interrupted_as_none<T>(answer: dialoguer::Result<Option<T>>) -> Result<Option<T>> {
    match answer {
        Ok(answer) => Ok(answer),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}
