//! Settings for the command prefixes and their alias tokens.
//!
//! Defaults are built in; a TOML file may override any field, and the
//! command line may override the two prefixes on top of that.
//! Default file location: ~/.config/postinstall-wizard/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::alias::Aliases;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub package_manager: String,
    pub install_flag: String,
    pub notify_command: String,
    pub package_manager_alias: String,
    pub notify_alias: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            package_manager: "yay --noconfirm --answerdiff=None --answeredit=None".into(),
            install_flag: "-S".into(),
            notify_command: "notify-send -i dialog-information -t 5000 -u critical".into(),
            package_manager_alias: "__MGR__".into(),
            notify_alias: "__NOTIFY__".into(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub package_manager: Option<String>,
    pub notify_command: Option<String>,
}

impl Settings {
    /// Default config file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("postinstall-wizard").join("config.toml"))
    }

    /// Resolve settings: defaults, then file, then overrides.
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(explicit: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        settings.apply(overrides);
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(manager) = &overrides.package_manager {
            self.package_manager = manager.clone();
        }
        if let Some(notify) = &overrides.notify_command {
            self.notify_command = notify.clone();
        }
    }

    pub fn aliases(&self) -> Aliases {
        Aliases::from_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "package_manager = \"paru\"").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.package_manager, "paru");
        assert_eq!(settings.install_flag, "-S");
        assert_eq!(settings.notify_alias, "__NOTIFY__");
    }

    #[test]
    fn overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "package_manager = \"paru\"\nnotify_command = \"true\"").unwrap();

        let overrides = Overrides {
            package_manager: Some("pacman --noconfirm".into()),
            notify_command: None,
        };
        let settings = Settings::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(settings.package_manager, "pacman --noconfirm");
        assert_eq!(settings.notify_command, "true");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load(Some(&missing), &Overrides::default()).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "package_manager = [").unwrap();
        assert!(Settings::from_file(file.path()).is_err());
    }
}
