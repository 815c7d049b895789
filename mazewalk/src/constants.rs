use std::path::PathBuf;

use dirs::preference_dir;

pub const DEFAULT_WIDTH: usize = 31;
pub const DEFAULT_HEIGHT: usize = 15;

pub fn base_path() -> PathBuf {
    preference_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mazewalk")
}
