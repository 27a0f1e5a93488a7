use crate::command::Command;
use crate::layout::SizingMode;
use crate::mappings::KeyNameToVirtualKey;
use crate::services::hotkeys::KeyBinding;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Trigger name that switches a default binding off
const DISABLED_KEY: &str = "none";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub placement: PlacementConfig,
    pub privileges: PrivilegesConfig,
    #[serde(default)]
    pub key_bindings: KeyBindingsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlacementConfig {
    pub sizing_mode: SizingMode,
    /// Older boolean spelling of `sizing_mode`; wins when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_by_pixel: Option<bool>,
    pub suppress_transitions: bool,
    pub split_poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrivilegesConfig {
    pub allow_non_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BindingConfig {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    pub key: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KeyBindingsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_right: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_left: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_up: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_down: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle_maximize: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_right: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_left: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_up: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_down: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximize: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore: Option<BindingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_op: Option<BindingConfig>,
}

impl BindingConfig {
    fn new(ctrl: bool, alt: bool, shift: bool, key: &str) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            key: key.to_string(),
        }
    }

    /// `None` when the binding is switched off with `key = "none"`
    pub fn to_binding(&self) -> Result<Option<KeyBinding>> {
        if self.key.trim().eq_ignore_ascii_case(DISABLED_KEY) {
            return Ok(None);
        }

        let key = KeyNameToVirtualKey::translate(&self.key).map_err(anyhow::Error::msg)?;
        if key.is_modifier() {
            anyhow::bail!("Modifier '{}' cannot be used as a trigger key", self.key);
        }

        Ok(Some(
            KeyBinding::new(key)
                .with_ctrl(self.ctrl)
                .with_alt(self.alt)
                .with_shift(self.shift),
        ))
    }
}

impl KeyBindingsConfig {
    pub fn get(&self, command: Command) -> Option<&BindingConfig> {
        let binding = match command {
            Command::MoveRight => &self.move_right,
            Command::MoveLeft => &self.move_left,
            Command::MoveUp => &self.move_up,
            Command::MoveDown => &self.move_down,
            Command::ToggleMaximize => &self.toggle_maximize,
            Command::SplitRight => &self.split_right,
            Command::SplitLeft => &self.split_left,
            Command::SplitUp => &self.split_up,
            Command::SplitDown => &self.split_down,
            Command::Maximize => &self.maximize,
            Command::Restore => &self.restore,
            Command::NoOp => &self.no_op,
        };
        binding.as_ref()
    }
}

impl PlacementConfig {
    pub fn effective_sizing_mode(&self) -> SizingMode {
        match self.size_by_pixel {
            Some(true) => SizingMode::PixelBased,
            Some(false) => SizingMode::PercentageBased,
            None => self.sizing_mode,
        }
    }

    pub fn split_poll_interval(&self) -> Duration {
        Duration::from_millis(self.split_poll_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
            placement: PlacementConfig {
                sizing_mode: SizingMode::PercentageBased,
                size_by_pixel: None,
                suppress_transitions: true,
                split_poll_interval_ms: 10,
            },
            privileges: PrivilegesConfig {
                allow_non_admin: true,
            },
            key_bindings: KeyBindingsConfig {
                move_right: Some(BindingConfig::new(true, false, false, "right")),
                move_left: Some(BindingConfig::new(true, false, false, "left")),
                move_up: Some(BindingConfig::new(true, false, false, "up")),
                move_down: Some(BindingConfig::new(true, false, false, "down")),
                toggle_maximize: Some(BindingConfig::new(true, false, true, "up")),
                split_right: Some(BindingConfig::new(true, true, false, "right")),
                split_left: Some(BindingConfig::new(true, true, false, "left")),
                split_up: Some(BindingConfig::new(true, true, false, "up")),
                split_down: Some(BindingConfig::new(true, true, false, "down")),
                ..KeyBindingsConfig::default()
            },
        }
    }
}

impl Config {
    /// Defaults, then the file (JSON when the extension says so, TOML
    /// otherwise), then `TELEWINDOW_*` environment variables.
    /// A missing file is not an error.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        figment = match config_path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => figment.merge(Json::file(config_path)),
            _ => figment.merge(Toml::file(config_path)),
        };
        figment = figment.merge(Env::prefixed("TELEWINDOW_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "pretty" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        if self.placement.split_poll_interval_ms > 1000 {
            anyhow::bail!(
                "split_poll_interval_ms must be at most 1000, got {}",
                self.placement.split_poll_interval_ms
            );
        }

        for command in Command::ALL {
            if let Some(binding) = self.key_bindings.get(command) {
                binding
                    .to_binding()
                    .with_context(|| format!("Invalid key binding for {}", command))?;
            }
        }

        Ok(())
    }

    /// Enabled bindings in hotkey evaluation order
    pub fn bindings(&self) -> Result<Vec<(Command, KeyBinding)>> {
        let mut bindings = Vec::new();
        for command in Command::ALL {
            let Some(config) = self.key_bindings.get(command) else {
                continue;
            };
            if let Some(binding) = config
                .to_binding()
                .with_context(|| format!("Invalid key binding for {}", command))?
            {
                bindings.push((command, binding));
            }
        }
        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::KeyCode;
    use figment::Jail;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_bindings_order() {
        let bindings = Config::default().bindings().unwrap();
        let commands: Vec<Command> = bindings.iter().map(|(command, _)| *command).collect();
        assert_eq!(
            commands,
            vec![
                Command::MoveRight,
                Command::MoveLeft,
                Command::MoveUp,
                Command::MoveDown,
                Command::ToggleMaximize,
                Command::SplitRight,
                Command::SplitLeft,
                Command::SplitUp,
                Command::SplitDown,
            ]
        );

        let (_, toggle) = bindings[4];
        assert_eq!(toggle, KeyBinding::new(KeyCode::UP).with_ctrl(true).with_shift(true));
    }

    #[test]
    fn test_modifier_trigger_rejected() {
        let mut config = Config::default();
        config.key_bindings.maximize = Some(BindingConfig::new(true, false, false, "lshift"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = Config::default();
        config.key_bindings.restore = Some(BindingConfig::new(true, false, false, "hyper"));
        let error = config.validate().unwrap_err();
        assert!(format!("{:#}", error).contains("Restore"));
    }

    #[test]
    fn test_invalid_logging_rejected() {
        let mut config = Config::default();
        config.logging.format = "json".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poll_interval_bound() {
        let mut config = Config::default();
        config.placement.split_poll_interval_ms = 1001;
        assert!(config.validate().is_err());
        config.placement.split_poll_interval_ms = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_size_by_pixel_alias() {
        let mut placement = Config::default().placement;
        assert_eq!(placement.effective_sizing_mode(), SizingMode::PercentageBased);
        placement.size_by_pixel = Some(true);
        assert_eq!(placement.effective_sizing_mode(), SizingMode::PixelBased);
    }

    #[test]
    fn test_load_toml_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "telewindow.toml",
                r#"
                [placement]
                sizing_mode = "pixel"

                [key_bindings.split_left]
                ctrl = true
                alt = false
                shift = true
                key = "VK_LEFT"

                [key_bindings.move_up]
                key = "none"

                [key_bindings.no_op]
                alt = true
                key = "f4"
                "#,
            )?;

            let config = Config::load("telewindow.toml").unwrap();
            assert_eq!(config.placement.effective_sizing_mode(), SizingMode::PixelBased);
            assert!(config.placement.suppress_transitions);

            let bindings = config.bindings().unwrap();
            assert!(!bindings.iter().any(|(command, _)| *command == Command::MoveUp));
            assert!(bindings.contains(&(
                Command::SplitLeft,
                KeyBinding::new(KeyCode::LEFT).with_ctrl(true).with_alt(false).with_shift(true)
            )));
            assert_eq!(bindings.last().map(|(command, _)| *command), Some(Command::NoOp));
            Ok(())
        });
    }

    #[test]
    fn test_load_json_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.json",
                r#"{ "privileges": { "allow_non_admin": false }, "placement": { "size_by_pixel": true } }"#,
            )?;

            let config = Config::load("config.json").unwrap();
            assert!(!config.privileges.allow_non_admin);
            assert_eq!(config.placement.effective_sizing_mode(), SizingMode::PixelBased);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("telewindow.toml", "[logging]\nlevel = \"warn\"\n")?;
            jail.set_env("TELEWINDOW_LOGGING__LEVEL", "debug");
            jail.set_env("TELEWINDOW_PLACEMENT__SPLIT_POLL_INTERVAL_MS", "25");

            let config = Config::load("telewindow.toml").unwrap();
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.placement.split_poll_interval(), Duration::from_millis(25));
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load("absent.toml").unwrap();
            assert_eq!(config.logging.level, "info");
            assert_eq!(config.bindings().unwrap().len(), 9);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_file_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("telewindow.toml", "[placement]\nsplit_poll_interval_ms = 5000\n")?;
            assert!(Config::load("telewindow.toml").is_err());
            Ok(())
        });
    }
}
