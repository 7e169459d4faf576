use std::path::Path;

use crate::shell::{EnvBlock, EnvVars, NotFound};
use crate::ui::style;
use crate::validator::{KeyStatus, ValidationReport};

use super::domain::{CurrentSummary, display_env_value};

const RULE_WIDTH: usize = 50;

pub fn print_banner() {
    println!();
    println!("  {}", style::accent(t!("wizard.banner")));
    println!("  {}", style::dim("━".repeat(RULE_WIDTH)));
}

pub fn print_section(title: &str) {
    println!();
    println!("  {}", style::header(title));
}

pub fn print_current(summary: &CurrentSummary) {
    let unknown = t!("common.unknown");
    print_section(&t!("wizard.current.title"));
    println!(
        "    {} {} ({})",
        t!("wizard.current.provider"),
        summary.provider_name.as_deref().unwrap_or(&unknown),
        style::dim(&summary.provider_id)
    );
    println!(
        "    {} {}",
        t!("wizard.current.model"),
        summary.model.as_deref().unwrap_or(&unknown)
    );
    println!(
        "    {} {} ({})",
        t!("wizard.current.api_key"),
        summary.api_key_name.as_deref().unwrap_or(&unknown),
        style::dim(summary.api_key_masked.as_deref().unwrap_or("sk-xxxx"))
    );
    println!(
        "    {} {}",
        t!("wizard.current.base_url"),
        summary.base_url.as_deref().unwrap_or(&unknown)
    );
    if let Some(hub) = &summary.model_hub_url {
        println!("    {} {}", t!("wizard.current.model_hub"), style::url(hub));
    }
    println!();
    println!("  {}", style::dim("━".repeat(RULE_WIDTH)));
}

pub fn print_success(message: &str) {
    println!("  {} {}", style::success("✓"), message);
}

pub fn print_warning(message: &str) {
    println!("  {} {}", style::warning("!"), message);
}

pub fn print_error(message: &str) {
    println!("  {} {}", style::error("✗"), message);
}

pub fn print_first_run(config_path: &Path) {
    print_success(&t!("wizard.first_run.created", path = config_path.display()));
    println!();
    println!("  {}", style::header(t!("wizard.first_run.next")));
    println!("    1. {}", t!("wizard.first_run.edit", path = config_path.display()));
    println!("    2. {}", t!("wizard.first_run.replace_keys"));
    println!("    3. {}", t!("wizard.first_run.models"));
    println!(
        "       {}",
        style::yellow(format!("vim {}", config_path.display()))
    );
}

fn print_vars(vars: &EnvVars) {
    for (key, value) in vars {
        println!("    {}: {}", key, style::value(display_env_value(key, value)));
    }
}

pub fn print_export_report(message: &str, vars: &EnvVars, path: &Path) {
    print_success(message);
    print_section(&t!("wizard.export.written_vars"));
    print_vars(vars);
    println!();
    println!("  {}", t!("wizard.export.source_hint"));
    println!(
        "    {}",
        style::yellow(format!("source {}", path.display()))
    );
    println!();
}

pub fn print_env_block(block: &EnvBlock, path: &Path) {
    print_success(&t!("wizard.view.found", path = path.display()));
    print_section(&t!("wizard.view.current_vars"));
    print_vars(&block.vars);
    print_section(&t!("wizard.view.details"));
    for line in block.section.lines() {
        println!("    {}", style::dim(line));
    }
    println!();
}

pub fn print_not_configured(path: &Path, reason: NotFound) {
    let message = match reason {
        NotFound::MissingFile => t!("wizard.view.missing_file", path = path.display()),
        NotFound::MissingMarkers => t!("wizard.view.missing_block", path = path.display()),
    };
    print_warning(&message);
    println!("  {}", style::dim(t!("wizard.view.hint")));
}

pub fn print_key_report(report: &ValidationReport) {
    print_section(&t!("wizard.validate.title"));
    for provider in &report.providers {
        println!();
        println!(
            "  {} ({})",
            style::header(&provider.name),
            style::dim(&provider.id)
        );
        if provider.keys.is_empty() {
            println!("    {}", style::dim(t!("wizard.validate.no_keys")));
        }
        for key in &provider.keys {
            let verdict = match &key.status {
                KeyStatus::Valid { status } => {
                    style::success(t!("wizard.validate.valid", status = status))
                }
                KeyStatus::Invalid { reason } => {
                    style::error(t!("wizard.validate.invalid", reason = reason))
                }
                KeyStatus::Skipped => style::warning(t!("wizard.validate.skipped")),
                KeyStatus::Empty => style::dim(t!("wizard.validate.empty")),
            };
            println!("    {} ({}): {}", key.name, style::dim(&key.masked), verdict);
        }
    }

    let totals = report.totals();
    println!();
    println!(
        "  {}",
        style::header(t!(
            "wizard.validate.totals",
            valid = totals.valid,
            invalid = totals.invalid,
            skipped = totals.skipped,
            empty = totals.empty
        ))
    );
    println!();
}

pub fn print_goodbye() {
    println!();
    println!("  {}", style::success(t!("wizard.goodbye")));
}
