//! Interactive provider/model/API key selection.

pub mod domain;
pub mod flow;
pub mod prompts;
pub mod state;
pub mod view;

pub use domain::CurrentSummary;
pub use flow::Wizard;
pub use prompts::{Choice, Prompter, TerminalPrompter};
pub use state::{Flow, MenuAction, WizardState};
