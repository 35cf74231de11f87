//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use dwell_core::{DEFAULT_TITLE_PATTERN, RuleError, TitleRules};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Title patterns tried in order. Capture group 1 is the activity name.
    pub title_patterns: Vec<String>,

    /// Command that prints the compositor event stream as JSON lines.
    pub niri_command: Vec<String>,

    /// The idle monitor binary.
    pub swayidle_command: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("title_patterns", &self.title_patterns)
            .field("niri_command", &self.niri_command.join(" "))
            .field("swayidle_command", &self.swayidle_command)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title_patterns: vec![DEFAULT_TITLE_PATTERN.to_string()],
            niri_command: ["niri", "msg", "-j", "event-stream"]
                .map(String::from)
                .to_vec(),
            swayidle_command: "swayidle".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Environment variables (DWELL_*)
        figment = figment.merge(Env::prefixed("DWELL_"));

        figment.extract()
    }

    /// Compiles the configured title patterns.
    pub fn title_rules(&self) -> Result<TitleRules, RuleError> {
        TitleRules::new(&self.title_patterns)
    }
}

/// Returns the platform-specific config directory for dwell.
///
/// On Linux: `~/.config/dwell`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dwell"))
}
