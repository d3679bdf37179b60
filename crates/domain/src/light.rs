//! Light commands sent to the lighting vendor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Power state of a bulb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    On,
    Off,
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Error returned when a string is not a recognizable power state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown power state {0:?}")]
pub struct UnknownPower(pub String);

impl FromStr for Power {
    type Err = UnknownPower;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            _ => Err(UnknownPower(s.to_string())),
        }
    }
}

/// Absolute target state for one or more bulbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    pub power: Power,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Brightness between 0.0 and 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    /// Transition duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl LightState {
    /// A bare power change, leaving color and brightness untouched.
    #[must_use]
    pub fn power(power: Power) -> Self {
        Self {
            power,
            color: None,
            brightness: None,
            duration: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: f64) -> Self {
        self.brightness = Some(brightness);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Relative change applied on top of the current bulb state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDelta {
    /// Hue rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<f64>,
    /// Transition duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl StateDelta {
    /// Rotate hue by `degrees`.
    #[must_use]
    pub fn hue(degrees: f64) -> Self {
        Self {
            hue: Some(degrees),
            duration: None,
        }
    }
}

/// Vendor selector addressing one or more bulbs (e.g. `label:Kitchen`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selector(String);

impl Selector {
    /// Wrap a vendor selector.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySelector`] if `value` is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptySelector);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Selector {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.0
    }
}

/// Per-bulb outcome reported by the lighting vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightResult {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Vendor status, `"ok"` on success.
    pub status: String,
}

impl LightResult {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_power_case_insensitively() {
        assert_eq!("ON".parse::<Power>(), Ok(Power::On));
        assert_eq!(" off ".parse::<Power>(), Ok(Power::Off));
    }

    #[test]
    fn should_reject_unknown_power() {
        assert_eq!(
            "dim".parse::<Power>(),
            Err(UnknownPower("dim".to_string()))
        );
    }

    #[test]
    fn should_serialize_power_only_state_without_optional_fields() {
        let json = serde_json::to_value(LightState::power(Power::Off)).unwrap();
        assert_eq!(json, serde_json::json!({"power": "off"}));
    }

    #[test]
    fn should_serialize_full_state() {
        let state = LightState::power(Power::On)
            .with_color("blue")
            .with_brightness(1.0)
            .with_duration(1.0);
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"power": "on", "color": "blue", "brightness": 1.0, "duration": 1.0})
        );
    }

    #[test]
    fn should_serialize_hue_delta() {
        let json = serde_json::to_value(StateDelta::hue(30.0)).unwrap();
        assert_eq!(json, serde_json::json!({"hue": 30.0}));
    }

    #[test]
    fn should_reject_blank_selector() {
        assert_eq!(Selector::new(""), Err(ValidationError::EmptySelector));
    }

    #[test]
    fn should_report_ok_result() {
        let result = LightResult {
            id: "d073d5".to_string(),
            label: "Bottom Bulb".to_string(),
            status: "ok".to_string(),
        };
        assert!(result.is_ok());
    }
}
