//! **ticman** -- a terminal manager that builds, upgrades and removes
//! TIC-80 Pro from source.
//!
//! The installer is an ordered list of shell steps run one at a time under a
//! [`ticman_core`] event loop:
//!
//! * [`recipe`] turns an [`Operation`](plan::Operation) into [`Step`](plan::Step)s.
//! * [`runner`] runs one step's command and captures its merged output.
//! * [`engine`] is the state machine: menu, running, done.
//! * [`app`] wires the engine to keys, the spinner and the log viewport.
//! * [`view`] draws the screen.
//!
//! ```ignore
//! let cli = ticman::config::Cli::parse();
//! ticman::run(cli).await?;
//! ```

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod keys;
pub mod plan;
pub mod privilege;
pub mod recipe;
pub mod runner;
pub mod theme;
pub mod transcript;
pub mod view;

use std::sync::Arc;

pub use error::{Error, Result};

use app::{App, AppFlags};
use config::Cli;
use runner::ShellRunner;
use theme::Theme;
use view::Branding;

/// Run the installer as described by `cli` until the operator quits.
pub async fn run(cli: Cli) -> Result<()> {
    let recipe = cli.load_recipe()?;

    if cli.print_recipe {
        print!("{}", recipe.to_toml()?);
        return Ok(());
    }

    privilege::require_root()?;

    if let Some(path) = &cli.log_file {
        config::init_logging(path)?;
    }
    tracing::info!(product = %recipe.product, shell = %cli.shell, "starting ticman");

    let options = cli.program_options(&recipe);
    let flags = AppFlags {
        branding: Branding {
            product: recipe.product.clone(),
            platform: recipe.platform.clone(),
        },
        planner: Arc::new(recipe),
        runner: Arc::new(ShellRunner::new(cli.shell).kill_on_drop(!cli.no_kill_on_quit)),
        theme: Theme::default(),
    };

    let app = ticman_core::run_with::<App>(flags, options).await?;
    tracing::info!("ticman finished");

    match app.fatal() {
        Some(reason) => Err(Error::Input(reason.to_string())),
        None => Ok(()),
    }
}
