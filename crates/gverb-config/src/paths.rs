//! Platform-specific preset locations.
//!
//! User presets live in `~/.config/gverb/presets/` on Linux,
//! `~/Library/Application Support/gverb/presets/` on macOS and
//! `%APPDATA%\gverb\presets\` on Windows.
//!
//! # Example
//!
//! ```rust,no_run
//! use gverb_config::paths;
//!
//! println!("User presets: {:?}", paths::user_presets_dir());
//!
//! // Path, then user directory, then factory presets
//! let preset = paths::load_preset("nice_hall").unwrap();
//! println!("{}", preset.name);
//! ```

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;
use crate::preset::ReverbPreset;

/// Application name used for directory paths.
const APP_NAME: &str = "gverb";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Falls back to `./gverb/presets` if the config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Find a preset file by name.
///
/// `name` may be a path to a TOML file, or a preset name (with or without
/// `.toml`) looked up in the user presets directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{}.toml", name)
    };

    let user_path = dir.join(filename);
    user_path.is_file().then_some(user_path)
}

/// Load a preset by path or name.
///
/// Searches a file path first, then the user presets directory, then the
/// factory presets.
pub fn load_preset(name: &str) -> Result<ReverbPreset, ConfigError> {
    load_preset_from(name, &user_presets_dir())
}

fn load_preset_from(name: &str, dir: &Path) -> Result<ReverbPreset, ConfigError> {
    if let Some(path) = find_preset_in(name, dir) {
        return ReverbPreset::load(path);
    }
    if let Some(preset) = get_factory_preset(name) {
        tracing::debug!(name, "using factory preset");
        return Ok(preset);
    }
    Err(ConfigError::PresetNotFound(name.to_string()))
}

/// Ensure the user presets directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
        tracing::debug!(dir = %dir.display(), "created user presets directory");
    }

    Ok(dir)
}

/// List all preset files in the user presets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List the `.toml` files in `dir`, sorted by path.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path.
///
/// ```rust
/// use gverb_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/cellar.toml"));
/// assert_eq!(name, Some("cellar".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
