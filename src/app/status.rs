use std::path::Path;

use crate::error::Result;
use crate::shell::{NotFound, ReadOutcome};
use crate::wizard::CurrentSummary;
use crate::wizard::domain::display_env_value;

/// Plain-text report for `ccs --show`. A shell file that cannot be read is
/// reported inline; it never fails the command.
pub fn render_status(
    summary: &CurrentSummary,
    export_path: &Path,
    export: &Result<ReadOutcome>,
) -> String {
    let unknown = t!("common.unknown").to_string();
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| unknown.clone());

    let mut lines = vec![
        format!("◆ {}", t!("status.title")),
        String::new(),
        format!(
            "  {} {} ({})",
            t!("wizard.current.provider"),
            field(&summary.provider_name),
            summary.provider_id
        ),
        format!("  {} {}", t!("wizard.current.model"), field(&summary.model)),
        format!(
            "  {} {} ({})",
            t!("wizard.current.api_key"),
            field(&summary.api_key_name),
            summary.api_key_masked.as_deref().unwrap_or("sk-xxxx")
        ),
        format!("  {} {}", t!("wizard.current.base_url"), field(&summary.base_url)),
    ];
    if let Some(hub) = &summary.model_hub_url {
        lines.push(format!("  {} {hub}", t!("wizard.current.model_hub")));
    }

    lines.push(String::new());
    lines.push(format!(
        "◆ {}",
        t!("status.export", path = export_path.display())
    ));
    match export {
        Ok(ReadOutcome::Found(block)) => {
            for (key, value) in &block.vars {
                lines.push(format!("  {key}: {}", display_env_value(key, value)));
            }
        }
        Ok(ReadOutcome::NotFound(NotFound::MissingFile)) => {
            lines.push(format!("  {}", t!("status.missing_file")));
        }
        Ok(ReadOutcome::NotFound(NotFound::MissingMarkers)) => {
            lines.push(format!("  {}", t!("status.missing_block")));
        }
        Err(e) => {
            lines.push(format!("  {}", t!("status.unreadable", reason = e)));
        }
    }

    lines.join("\n")
}
