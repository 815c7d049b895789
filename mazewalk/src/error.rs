use std::io;

use mazecore::{MazeError, UnknownStrategy};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Strategy(#[from] UnknownStrategy),
    #[error("settings file: {0}")]
    Settings(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("logger is already set")]
    Logger(#[from] log::SetLoggerError),
    #[error("generated maze has no {0}")]
    MissingEndpoint(&'static str),
}
