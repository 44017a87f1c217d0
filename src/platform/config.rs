// Assistant Console - platform/config.rs
//
// config.toml loading with startup validation.
//
// Every value is validated against named constants at load time; invalid
// values produce actionable warnings and fall back to defaults so a typo
// never prevents the console from starting.

use crate::util::constants;
use std::path::Path;

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logs]` section.
    pub logs: LogsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logs]` config section — the engine log tail view.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LogsSection {
    /// Tail poll interval in ms.
    pub poll_interval_ms: Option<u64>,
}

/// `[logging]` config section — the console's own diagnostics.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Dark mode (true) or light mode (false). Overridden by persisted
    /// UI preferences once the user has toggled the theme in-app.
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,
    /// Tail poll interval in ms.
    pub log_poll_interval_ms: u64,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_poll_interval_ms: constants::LOG_POLL_INTERVAL_MS,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no warnings
/// (first-run). If the file is unparseable, returns defaults with an error
/// warning — the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults. \
                 See config.example.toml for the expected format.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all errors.
    let mut config = AppConfig::default();

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logs: poll_interval_ms --
    if let Some(interval) = raw.logs.poll_interval_ms {
        if (constants::MIN_LOG_POLL_INTERVAL_MS..=constants::MAX_LOG_POLL_INTERVAL_MS)
            .contains(&interval)
        {
            config.log_poll_interval_ms = interval;
        } else {
            warnings.push(format!(
                "[logs] poll_interval_ms = {interval} is out of range ({}-{}). Using default ({}).",
                constants::MIN_LOG_POLL_INTERVAL_MS,
                constants::MAX_LOG_POLL_INTERVAL_MS,
                constants::LOG_POLL_INTERVAL_MS,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

// =============================================================================
// Unit tests
// =============================================================================
