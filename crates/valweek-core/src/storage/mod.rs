pub mod photos;
pub mod progress;

pub use photos::{MemoryPhotoStore, PhotoDb, PhotoRecord, PhotoStore};
pub use progress::{
    JsonProgressStore, MemoryProgressStore, ProgressMap, ProgressRecord, ProgressStore,
};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/valweek[-dev]/` based on VALWEEK_ENV.
///
/// Set VALWEEK_ENV=dev to use the development data directory, or
/// VALWEEK_DATA_DIR to point somewhere else entirely (tests do this).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    if let Ok(explicit) = std::env::var("VALWEEK_DATA_DIR") {
        let dir = PathBuf::from(explicit);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("VALWEEK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("valweek-dev")
    } else {
        base_dir.join("valweek")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
