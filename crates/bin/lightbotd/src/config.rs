//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `lightbot.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values; the credential variables keep the names used by the
//! bot hosting environment (`LifxApiKey`, `LuisAppId`, ...).

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use lightbot_adapter_lifx::LifxConfig;
use lightbot_adapter_luis::LuisConfig;
use lightbot_app::intent_router::DEFAULT_INTENT_THRESHOLD;
use lightbot_app::services::light_service::LightTargets;
use lightbot_domain::cycle::CycleSettings;
use lightbot_domain::effect::EffectSettings;
use lightbot_domain::light::Selector;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Lighting backend and targets.
    pub lighting: LightingConfig,
    /// Intent recognition.
    pub nlu: NluConfig,
    /// Bot channel credentials.
    pub bot: BotConfig,
    /// Pulse effect timing.
    pub effects: EffectsConfig,
    /// Color cycle timing.
    pub cycle: CycleConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Which lighting client to wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingBackend {
    /// LIFX cloud HTTP API.
    #[default]
    Lifx,
    /// In-memory simulated bulbs.
    Virtual,
}

impl std::str::FromStr for LightingBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lifx" => Ok(Self::Lifx),
            "virtual" => Ok(Self::Virtual),
            other => Err(ConfigError::Validation(format!(
                "unknown lighting backend {other:?}"
            ))),
        }
    }
}

/// Lighting configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub backend: LightingBackend,
    /// Selector for effects, the cycle and unmapped locations.
    pub selector: String,
    /// Spoken location → selector.
    pub locations: BTreeMap<String, String>,
    /// LIFX client settings (`api_key`, `base_url`, `request_timeout_secs`).
    #[serde(flatten)]
    pub lifx: LifxConfig,
}

/// NLU configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NluConfig {
    /// LUIS endpoint settings (`host`, `app_id`, `api_key`, `api_version`).
    #[serde(flatten)]
    pub luis: LuisConfig,
    /// Minimum score for an intent to be acted upon.
    pub intent_threshold: f64,
}

/// Bot channel credentials.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub app_id: String,
    /// When set, `/api/messages` requires `Authorization: Bearer <password>`.
    pub app_password: String,
}

/// Pulse effect timing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Seconds per pulse.
    pub period: f64,
    /// Number of pulses.
    pub cycles: f64,
}

/// Color cycle timing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub tick_secs: u64,
    /// Delay before a cycle interrupted by a one-shot command restarts.
    pub resume_secs: u64,
    /// Hue rotation per tick, in degrees.
    pub hue_delta: f64,
    pub initial_color: String,
}

impl Config {
    /// Load configuration from `lightbot.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("lightbot.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("LIGHTBOT_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("LIGHTBOT_PORT") {
            self.server.port = parse_port("LIGHTBOT_PORT", &val)?;
        }
        if let Some(val) = var("LIGHTBOT_BIND") {
            let (host, port) = val.rsplit_once(':').ok_or_else(|| {
                ConfigError::Validation(format!("LIGHTBOT_BIND must be host:port, got {val:?}"))
            })?;
            self.server.port = parse_port("LIGHTBOT_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(val) = var("LIGHTBOT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }

        if let Some(val) = var("LIGHTBOT_LIGHTING_BACKEND") {
            self.lighting.backend = val.parse()?;
        }
        if let Some(val) = var("LifxApiKey") {
            self.lighting.lifx.api_key = val;
        }
        if let Some(val) = var("LIGHTBOT_LIFX_URL") {
            self.lighting.lifx.base_url = val;
        }
        if let Some(val) = var("LIGHTBOT_SELECTOR") {
            self.lighting.selector = val;
        }

        if let Some(val) = var("LuisAPIHostName") {
            self.nlu.luis.host = val;
        }
        if let Some(val) = var("LuisAppId") {
            self.nlu.luis.app_id = val;
        }
        if let Some(val) = var("LuisAPIKey") {
            self.nlu.luis.api_key = val;
        }
        if let Some(val) = var("LuisAPIVersion") {
            self.nlu.luis.api_version = val;
        }

        if let Some(val) = var("MicrosoftAppId") {
            self.bot.app_id = val;
        }
        if let Some(val) = var("MicrosoftAppPassword") {
            self.bot.app_password = val;
        }

        if let Some(val) = var("LifxEffectPeriod") {
            self.effects.period = parse_number("LifxEffectPeriod", &val)?;
        }
        if let Some(val) = var("LifxEffectCycles") {
            self.effects.cycles = parse_number("LifxEffectCycles", &val)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("port must be non-zero"));
        }
        if self.lighting.backend == LightingBackend::Lifx && self.lighting.lifx.api_key.is_empty() {
            return Err(invalid("LIFX api key must be set (LifxApiKey)"));
        }
        let luis = &self.nlu.luis;
        if luis.host.is_empty() || luis.app_id.is_empty() || luis.api_key.is_empty() {
            return Err(invalid(
                "LUIS host, app id and key must be set (LuisAPIHostName, LuisAppId, LuisAPIKey)",
            ));
        }
        if !(0.0..=1.0).contains(&self.nlu.intent_threshold) {
            return Err(invalid("intent threshold must be between 0 and 1"));
        }
        if self.lighting.lifx.request_timeout_secs == 0 || luis.request_timeout_secs == 0 {
            return Err(invalid("lighting and nlu request timeouts must be non-zero"));
        }
        if self.cycle.tick_secs == 0 || self.cycle.resume_secs == 0 {
            return Err(invalid("cycle tick and resume delays must be non-zero"));
        }
        self.effect_settings()?;
        self.light_targets()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Bot password guarding the webhook, if any.
    #[must_use]
    pub fn app_password(&self) -> Option<String> {
        Some(self.bot.app_password.clone()).filter(|password| !password.is_empty())
    }

    /// Pulse timing.
    ///
    /// # Errors
    ///
    /// Returns a validation error if period or cycles is not positive.
    pub fn effect_settings(&self) -> Result<EffectSettings, ConfigError> {
        EffectSettings::new(self.effects.period, self.effects.cycles)
            .map_err(|err| ConfigError::Validation(err.to_string()))
    }

    /// Default selector and location map.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any selector is empty.
    pub fn light_targets(&self) -> Result<LightTargets, ConfigError> {
        let selector = |value: &str| {
            Selector::new(value).map_err(|err| ConfigError::Validation(err.to_string()))
        };
        self.lighting.locations.iter().try_fold(
            LightTargets::new(selector(&self.lighting.selector)?),
            |targets, (location, value)| Ok(targets.with_location(location, selector(value)?)),
        )
    }

    /// Color cycle timing.
    #[must_use]
    pub fn cycle_settings(&self) -> CycleSettings {
        CycleSettings {
            tick: Duration::from_secs(self.cycle.tick_secs),
            resume_delay: Duration::from_secs(self.cycle.resume_secs),
            hue_delta: self.cycle.hue_delta,
            initial_color: self.cycle.initial_color.clone(),
        }
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Validation(message.to_string())
}

fn parse_port(name: &str, value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{name} must be a port number, got {value:?}")))
}

fn parse_number(name: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{name} must be a number, got {value:?}")))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3978,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "lightbotd=info,lightbot=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            backend: LightingBackend::default(),
            selector: "label:Bottom Bulb".to_string(),
            locations: BTreeMap::new(),
            lifx: LifxConfig::default(),
        }
    }
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            luis: LuisConfig::default(),
            intent_threshold: DEFAULT_INTENT_THRESHOLD,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        let settings = EffectSettings::default();
        Self {
            period: settings.period,
            cycles: settings.cycles,
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        let settings = CycleSettings::default();
        Self {
            tick_secs: settings.tick.as_secs(),
            resume_secs: settings.resume_delay.as_secs(),
            hue_delta: settings.hue_delta,
            initial_color: settings.initial_color,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
