use console::style;
use std::fmt::Display;

/// Checkmarks and completed writes.
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

pub fn error<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Self-healing notices and skipped keys.
pub fn warning<D: Display>(text: D) -> String {
    style(text).yellow().bold().to_string()
}

pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Secondary text: provider ids, masked keys, rules.
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Commands the user can copy, such as `source ~/.zshrc`.
pub fn yellow<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Exported variable values.
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Model hub links.
pub fn url<D: Display>(text: D) -> String {
    style(text).cyan().underlined().to_string()
}
