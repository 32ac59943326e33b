use std::path::PathBuf;

use thiserror::Error;
use ticman_core::ProgramError;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop ticman before or while the UI runs.
///
/// Failed install steps are not errors at this level: the engine turns them
/// into a failed run outcome and shows them to the operator.
#[derive(Error, Debug)]
pub enum Error {
    #[error("This program must be run as root (sudo).")]
    NotRoot,

    #[error("could not read recipe `{}`: {source}", .path.display())]
    ReadRecipe {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse recipe `{}`: {source}", .path.display())]
    ParseRecipe {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid recipe: {0}")]
    InvalidRecipe(String),

    #[error("could not print recipe: {0}")]
    PrintRecipe(#[from] toml::ser::Error),

    #[error("could not open log file `{}`: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Terminal(#[from] ProgramError),

    #[error("terminal input failed: {0}")]
    Input(String),
}
