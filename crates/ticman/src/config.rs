//! Command-line options and the settings derived from them.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use ticman_core::ProgramOptions;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};
use crate::recipe::Recipe;

/// Environment variable holding the log filter, e.g. `ticman=debug`.
pub const LOG_ENV: &str = "TICMAN_LOG";

#[derive(Parser, Debug)]
#[command(name = "ticman")]
#[command(version, about = "Build, upgrade or remove TIC-80 Pro from source")]
pub struct Cli {
    /// Recipe file (TOML) overriding the built-in build recipe
    #[arg(long, value_name = "PATH")]
    pub recipe: Option<PathBuf>,

    /// Print the effective recipe as TOML and exit
    #[arg(long)]
    pub print_recipe: bool,

    /// Shell that runs each step's command line
    #[arg(long, default_value = "bash")]
    pub shell: String,

    /// Maximum redraws per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=120))]
    pub fps: u32,

    /// Append diagnostics to this file (filter with TICMAN_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Leave a running step alive when quitting instead of killing it
    #[arg(long)]
    pub no_kill_on_quit: bool,
}

impl Cli {
    /// The recipe named by `--recipe`, or the built-in one.
    pub fn load_recipe(&self) -> Result<Recipe> {
        match &self.recipe {
            Some(path) => Recipe::load(path),
            None => Ok(Recipe::default()),
        }
    }

    pub fn program_options(&self, recipe: &Recipe) -> ProgramOptions {
        ProgramOptions {
            fps: self.fps,
            title: Some(format!("{} Manager", recipe.product)),
            ..ProgramOptions::default()
        }
    }
}

/// Send `tracing` output to `path`. The terminal belongs to the UI, so
/// nothing is ever logged to stdout or stderr.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["ticman"]).unwrap();
        assert_eq!(cli.shell, "bash");
        assert_eq!(cli.fps, 60);
        assert!(!cli.no_kill_on_quit);
        assert_eq!(cli.load_recipe().unwrap(), Recipe::default());

        let options = cli.program_options(&Recipe::default());
        assert_eq!(options.title.as_deref(), Some("TIC-80 Pro Manager"));
        assert!(options.alt_screen);
    }

    #[test]
    fn fps_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["ticman", "--fps", "0"]).is_err());
        assert!(Cli::try_parse_from(["ticman", "--fps", "500"]).is_err());
    }

    #[test]
    fn recipe_flag_loads_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "product = \"TIC-80\"").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["ticman", "--recipe", path]).unwrap();
        assert_eq!(cli.load_recipe().unwrap().product, "TIC-80");
    }

    #[test]
    fn missing_recipe_file_is_a_read_error() {
        let cli = Cli::try_parse_from(["ticman", "--recipe", "/nonexistent/recipe.toml"]).unwrap();
        assert!(matches!(cli.load_recipe(), Err(Error::ReadRecipe { .. })));
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let err = init_logging(Path::new("/nonexistent/dir/ticman.log")).unwrap_err();
        assert!(matches!(err, Error::LogFile { .. }));
    }
}
