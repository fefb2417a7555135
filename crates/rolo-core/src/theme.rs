//! Theme preference persistence
//!
//! The light/dark preference lives in its own file under the data
//! directory, separate from the client set. It is orthogonal to the
//! record-sync core and never synced.

use std::fs;

use tracing::warn;

use crate::config::Config;
use crate::storage::persistence::atomic_write;
use crate::storage::StorageResult;

/// UI theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Load the theme preference, defaulting to light
///
/// Missing or unreadable preference files fall back to the default
/// rather than failing.
pub fn load(config: &Config) -> Theme {
    let path = config.theme_path();

    if !path.exists() {
        return Theme::default();
    }

    match fs::read_to_string(&path) {
        Ok(content) => content.parse().unwrap_or_else(|err| {
            warn!("Ignoring theme preference: {}", err);
            Theme::default()
        }),
        Err(err) => {
            warn!("Failed to read theme preference from {:?}: {}", path, err);
            Theme::default()
        }
    }
}

/// Persist the theme preference
pub fn save(config: &Config, theme: Theme) -> StorageResult<()> {
    atomic_write(&config.theme_path(), theme.as_str().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(load(&test_config(&temp_dir)), Theme::Light);
    }

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        save(&config, Theme::Dark).unwrap();
        assert_eq!(load(&config), Theme::Dark);

        save(&config, Theme::Light).unwrap();
        assert_eq!(load(&config), Theme::Light);
    }

    #[test]
    fn test_invalid_content_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        fs::write(config.theme_path(), "sepia").unwrap();
        assert_eq!(load(&config), Theme::Light);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
