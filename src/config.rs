use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location the router starts at (path plus optional query)
    pub start_url: String,
    pub search: SearchConfig,
    pub window: WindowConfig,
    pub replay: ReplayConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before typed text is written to the URL
    pub debounce_ms: u64,
    pub placeholder: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Gap between characters for `type` commands
    pub keystroke_ms: u64,
}

impl SearchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl ReplayConfig {
    pub fn keystroke_gap(&self) -> Duration {
        Duration::from_millis(self.keystroke_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_url: "/search".to_string(),
            search: SearchConfig::default(),
            window: WindowConfig::default(),
            replay: ReplayConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            placeholder: "Search...".to_string(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 160.0,
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { keystroke_ms: 50 }
    }
}

pub fn load_from(path: &Path) -> Config {
    load_path(path)
}

pub fn load() -> Config {
    match config_path() {
        Some(path) => load_path(&path),
        None => {
            tracing::warn!("Could not determine home directory, using default config");
            Config::default()
        }
    }
}

fn load_path(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config: {}, using defaults", e);
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file: {}, using defaults", e);
            Config::default()
        }
    }
}

fn config_path() -> Option<PathBuf> {
    // ~/.config/ on every platform, not the macOS Application Support dir
    Some(
        dirs::home_dir()?
            .join(".config")
            .join("filterbar")
            .join("config.toml"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "start_url = \"/catalog?category=books\"").unwrap();
        writeln!(file, "[search]").unwrap();
        writeln!(file, "debounce_ms = 150").unwrap();

        let config = load_from(file.path());
        assert_eq!(config.start_url, "/catalog?category=books");
        assert_eq!(config.search.delay(), Duration::from_millis(150));
        assert_eq!(config.search.placeholder, "Search...");
        assert_eq!(config.replay.keystroke_ms, 50);
    }

    #[test]
    fn missing_or_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("absent.toml"));
        assert_eq!(config.search.debounce_ms, 300);

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "search = [").unwrap();
        let config = load_from(&bad);
        assert_eq!(config.start_url, "/search");
        assert_eq!(config.window.width, 640.0);
    }
}
