use tracing::{info, warn};

use crate::app::status::render_status;
use crate::cli::Cli;
use crate::config::{ConfigStore, Settings};
use crate::error::Result;
use crate::shell::{ShellEnvFile, ShellKind};
use crate::wizard::{CurrentSummary, TerminalPrompter, Wizard, view};

/// Load the provider document and run whatever the command line asked for.
///
/// Errors returned from here (a bad provider document, or a terminal that
/// cannot be prompted) end the process with a non-zero status.
pub async fn dispatch(cli: Cli, settings: Settings) -> Result<()> {
    let store = ConfigStore::new(&settings.config_path);
    if store.ensure_exists()? {
        info!(path = %store.path().display(), "created provider config from template");
        view::print_first_run(store.path());
    }
    let document = store.load()?;

    if cli.show {
        let path = settings.export_path(document.last_config_path.as_deref());
        let export = ShellEnvFile::new(&path, ShellKind::for_path(&path, settings.shell)).read();
        if let Err(e) = &export {
            warn!(error = %e, "could not read shell file for --show");
        }
        println!(
            "{}",
            render_status(&CurrentSummary::of(&document), &path, &export)
        );
        return Ok(());
    }

    let mut wizard = Wizard::new(store, document, TerminalPrompter::new(), settings);
    wizard.run().await
}
