use std::{
    fs,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use mazecore::{Strategy, UnknownStrategy};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{base_path, DEFAULT_HEIGHT, DEFAULT_WIDTH},
    error::AppError,
};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub chunked: Option<bool>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> PathBuf {
        base_path().join("settings.ron")
    }

    pub fn set_width(mut self, value: usize) -> Self {
        self.width = Some(value);
        self
    }

    pub fn get_width(&self) -> usize {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    pub fn set_height(mut self, value: usize) -> Self {
        self.height = Some(value);
        self
    }

    pub fn get_height(&self) -> usize {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }

    pub fn set_strategy(mut self, value: impl Into<String>) -> Self {
        self.strategy = Some(value.into());
        self
    }

    /// Parsed strategy, `chunked` turns plain breadth-first into its layered form.
    pub fn get_strategy(&self) -> Result<Strategy, UnknownStrategy> {
        let strategy = match &self.strategy {
            Some(name) => name.parse()?,
            None => Strategy::default(),
        };

        Ok(match strategy {
            Strategy::BreadthFirst if self.get_chunked() => Strategy::BreadthFirstChunked,
            strategy => strategy,
        })
    }

    pub fn set_chunked(mut self, value: bool) -> Self {
        self.chunked = Some(value);
        self
    }

    pub fn get_chunked(&self) -> bool {
        self.chunked.unwrap_or_default()
    }

    pub fn set_log_level(mut self, value: LevelFilter) -> Self {
        self.log_level = Some(value.to_string());
        self
    }

    /// Unparsable levels fall back to `warn`.
    pub fn get_log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Warn)
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    fn parse(source: &str) -> Result<Self, AppError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(source)?)
    }

    /// Reads the settings at `path`, writing the defaults there first if the file is missing.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(source) => Self::parse(&source),
            Err(_) => {
                Self::reset_config(path)?;
                Self::parse(DEFAULT_SETTINGS)
            }
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}
