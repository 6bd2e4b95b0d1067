//! Lumen configuration system
//!
//! This crate provides centralized configuration management for the Lumen
//! portfolio runtime, loading settings from `lumen.toml` with environment
//! variable overrides layered on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "lumen.toml";

/// Placeholder values shipped in templates; treated the same as "unset".
const CONTACT_PLACEHOLDERS: [&str; 3] = ["YOUR_SERVICE_ID", "YOUR_TEMPLATE_ID", "YOUR_PUBLIC_KEY"];

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LumenConfig {
    /// Smooth scroll engine settings
    pub scroll: ScrollSettings,
    /// Default reveal animation settings
    pub reveal: RevealSettings,
    /// Loading gate settings
    pub preloader: PreloaderSettings,
    /// Navigation bar settings
    pub navigation: NavigationSettings,
    /// Contact form delivery settings
    pub contact: ContactSettings,
}

/// Smooth scroll configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Seconds to reach the target offset after input stops
    pub duration: f32,
    /// Easing curve name (`expo_out`, `power2.out`, `ease-in-out`, ...)
    pub easing: String,
    /// Per-frame damping factor; replaces duration/easing when set
    pub lerp: Option<f32>,
    /// `vertical` or `horizontal`
    pub orientation: String,
    pub smooth_wheel: bool,
    pub smooth_touch: bool,
    pub wheel_multiplier: f32,
    pub touch_multiplier: f32,
    /// Distance in pixels under which the offset snaps to the target
    pub epsilon: f32,
}

/// Reveal animation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    /// Easing for reveals that do not name one
    pub default_easing: String,
    /// Multiplier on every reveal duration, delay and stagger; 0 shows content instantly
    pub duration_scale: f32,
}

/// Loading gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderSettings {
    /// Time for the progress counter to reach 100
    pub duration_ms: f32,
    /// Overlay fade-out time once progress completes
    pub fade_ms: f32,
    /// Open the gate on the first frame
    pub skip: bool,
}

/// Navigation bar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Scroll offset in pixels after which the bar switches to its condensed style
    pub condensed_after: f32,
}

/// Contact form delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    /// Address used for both the service payload and the mail-client fallback
    pub recipient: String,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            duration: 1.2,
            easing: "expo_out".to_string(),
            lerp: None,
            orientation: "vertical".to_string(),
            smooth_wheel: true,
            smooth_touch: false,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
            epsilon: 0.5,
        }
    }
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            default_easing: "power1.out".to_string(),
            duration_scale: 1.0,
        }
    }
}

impl Default for PreloaderSettings {
    fn default() -> Self {
        Self {
            duration_ms: 2500.0,
            fade_ms: 800.0,
            skip: false,
        }
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            condensed_after: 50.0,
        }
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            service_id: None,
            template_id: None,
            public_key: None,
            recipient: "hello@example.com".to_string(),
        }
    }
}

impl ContactSettings {
    /// True when every credential for the external message service is present
    /// and none of them is a template placeholder.
    pub fn is_configured(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|value| match value {
                Some(v) => !v.trim().is_empty() && !CONTACT_PLACEHOLDERS.contains(&v.as_str()),
                None => false,
            })
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl LumenConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location (lumen.toml in the current directory)
    /// or return default configuration if the file doesn't exist or is invalid
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        // Scroll settings
        if let Ok(val) = std::env::var("LUMEN_SCROLL_DURATION") {
            if let Ok(duration) = val.parse::<f32>() {
                self.scroll.duration = duration;
            }
        }
        if let Ok(val) = std::env::var("LUMEN_SCROLL_LERP") {
            if let Ok(lerp) = val.parse::<f32>() {
                self.scroll.lerp = Some(lerp);
            }
        }
        if let Ok(val) = std::env::var("LUMEN_WHEEL_MULTIPLIER") {
            if let Ok(mult) = val.parse::<f32>() {
                self.scroll.wheel_multiplier = mult;
            }
        }
        if let Ok(val) = std::env::var("LUMEN_TOUCH_MULTIPLIER") {
            if let Ok(mult) = val.parse::<f32>() {
                self.scroll.touch_multiplier = mult;
            }
        }

        // Reveals
        if let Ok(val) = std::env::var("LUMEN_REVEAL_DURATION_SCALE") {
            if let Ok(scale) = val.parse::<f32>() {
                self.reveal.duration_scale = scale.max(0.0);
            }
        }

        // Preloader
        if let Ok(val) = std::env::var("LUMEN_SKIP_PRELOADER") {
            self.preloader.skip = env_flag(&val);
        }

        // Contact delivery
        if let Ok(val) = std::env::var("LUMEN_CONTACT_SERVICE_ID") {
            self.contact.service_id = Some(val);
        }
        if let Ok(val) = std::env::var("LUMEN_CONTACT_TEMPLATE_ID") {
            self.contact.template_id = Some(val);
        }
        if let Ok(val) = std::env::var("LUMEN_CONTACT_PUBLIC_KEY") {
            self.contact.public_key = Some(val);
        }
        if let Ok(val) = std::env::var("LUMEN_CONTACT_RECIPIENT") {
            self.contact.recipient = val;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from lumen.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = LumenConfig::default();
        assert_eq!(config.scroll.duration, 1.2);
        assert_eq!(config.scroll.easing, "expo_out");
        assert_eq!(config.scroll.touch_multiplier, 2.0);
        assert!(config.scroll.smooth_wheel);
        assert!(config.scroll.lerp.is_none());
        assert_eq!(config.preloader.duration_ms, 2500.0);
        assert_eq!(config.navigation.condensed_after, 50.0);
        assert!(!config.contact.is_configured());
    }

    #[test]
    fn test_toml_serialization() {
        let config = LumenConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: LumenConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scroll.orientation, "vertical");
        assert_eq!(parsed.reveal.default_easing, "power1.out");
        assert_eq!(parsed.reveal.duration_scale, 1.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scroll]\nlerp = 0.1\n\n[preloader]\nskip = true").unwrap();

        let config = LumenConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.scroll.lerp, Some(0.1));
        assert_eq!(config.scroll.duration, 1.2);
        assert!(config.preloader.skip);
        assert_eq!(config.preloader.fade_ms, 800.0);
    }

    #[test]
    fn test_missing_file_reports_read_error() {
        let err = LumenConfig::load_from_file("/definitely/not/here/lumen.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scroll\nduration = ").unwrap();
        let err = LumenConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_contact_placeholders_are_unconfigured() {
        let mut contact = ContactSettings {
            service_id: Some("svc_123".into()),
            template_id: Some("tpl_456".into()),
            public_key: Some("YOUR_PUBLIC_KEY".into()),
            ..Default::default()
        };
        assert!(!contact.is_configured());

        contact.public_key = Some("pk_789".into());
        assert!(contact.is_configured());

        contact.template_id = Some("  ".into());
        assert!(!contact.is_configured());
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("LUMEN_SCROLL_LERP", "0.08");
            std::env::set_var("LUMEN_SKIP_PRELOADER", "true");
            std::env::set_var("LUMEN_CONTACT_RECIPIENT", "me@example.org");
        }

        let mut config = LumenConfig::default();
        config.merge_with_env();

        assert_eq!(config.scroll.lerp, Some(0.08));
        assert!(config.preloader.skip);
        assert_eq!(config.contact.recipient, "me@example.org");

        unsafe {
            std::env::remove_var("LUMEN_SCROLL_LERP");
            std::env::remove_var("LUMEN_SKIP_PRELOADER");
            std::env::remove_var("LUMEN_CONTACT_RECIPIENT");
        }
    }
}
