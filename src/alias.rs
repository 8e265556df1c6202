//! Placeholder expansion for shell actions.
//!
//! Checklists refer to the package manager and the notification command
//! through two literal tokens so the same document works with other
//! invocation prefixes. Expansion is a plain global replace of each token.

use crate::config::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aliases {
    package_manager: String,
    install_flag: String,
    notify_command: String,
    package_manager_token: String,
    notify_token: String,
}

impl Default for Aliases {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Aliases {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            package_manager: settings.package_manager.clone(),
            install_flag: settings.install_flag.clone(),
            notify_command: settings.notify_command.clone(),
            package_manager_token: settings.package_manager_alias.clone(),
            notify_token: settings.notify_alias.clone(),
        }
    }

    /// Full install invocation for one package.
    pub fn install_command(&self, package: &str) -> String {
        if self.install_flag.is_empty() {
            format!("{} {}", self.package_manager, package)
        } else {
            format!("{} {} {}", self.package_manager, self.install_flag, package)
        }
    }

    /// Replace every occurrence of both tokens.
    pub fn substitute(&self, script: &str) -> String {
        let script = replace_token(script, &self.package_manager_token, &self.package_manager);
        replace_token(&script, &self.notify_token, &self.notify_command)
    }
}

fn replace_token(text: &str, token: &str, value: &str) -> String {
    // An empty token would match between every character.
    if token.is_empty() {
        return text.to_string();
    }
    text.replace(token, value)
}
