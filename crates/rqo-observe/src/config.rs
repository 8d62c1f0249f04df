use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{format::LoggerFormat, level::LoggerLevel, timer::LoggerTimeZone};

/// Logger configuration. Every field has a default, so `{}` is a valid document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directives.
    pub level: LoggerLevel,
    pub tz: LoggerTimeZone,
    /// Include the event target (module path) in each line.
    pub with_targets: bool,
    /// Allow ANSI colors; only honoured when stderr is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Colors are enabled only for text output on a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && self.format == LoggerFormat::Text && std::io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg: LoggerConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level.as_str(), "info");
        assert_eq!(cfg.tz, LoggerTimeZone::Utc);
        assert!(cfg.with_targets);
        assert!(cfg.use_color);
    }

    #[test]
    fn partial_document() {
        let cfg: LoggerConfig =
            serde_json::from_str(r#"{"format": "json", "level": "rqo_core=debug", "with_targets": false}"#)
                .unwrap();

        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level.as_str(), "rqo_core=debug");
        assert!(!cfg.with_targets);
        assert!(cfg.use_color);
    }

    #[test]
    fn keys_are_snake_case() {
        let json = serde_json::to_value(LoggerConfig::default()).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["format", "level", "tz", "use_color", "with_targets"]);
    }

    #[test]
    fn json_never_uses_color() {
        let cfg = LoggerConfig {
            format: LoggerFormat::Json,
            use_color: true,
            ..Default::default()
        };
        assert!(!cfg.should_use_color());
    }

    #[test]
    fn invalid_level_is_rejected() {
        assert!(serde_json::from_str::<LoggerConfig>(r#"{"level": "x=nope"}"#).is_err());
    }
}
