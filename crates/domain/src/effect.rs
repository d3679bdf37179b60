//! Lighting effects — one-shot pulses and the continuous color cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Runtime-configured timing shared by every pulse preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSettings {
    /// Seconds per pulse cycle.
    pub period: f64,
    /// Number of pulse cycles.
    pub cycles: f64,
}

impl EffectSettings {
    /// Build settings, rejecting non-positive values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveEffectSetting`] if `period` or
    /// `cycles` is zero, negative, or NaN.
    pub fn new(period: f64, cycles: f64) -> Result<Self, ValidationError> {
        if period.is_nan() || period <= 0.0 {
            return Err(ValidationError::NonPositiveEffectSetting {
                field: "period",
                value: period,
            });
        }
        if cycles.is_nan() || cycles <= 0.0 {
            return Err(ValidationError::NonPositiveEffectSetting {
                field: "cycles",
                value: cycles,
            });
        }
        Ok(Self { period, cycles })
    }
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            period: 1.0,
            cycles: 5.0,
        }
    }
}

/// Parameters of a pulse: oscillate between two colors `cycles` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseEffect {
    pub color: String,
    pub from_color: String,
    pub period: f64,
    pub cycles: f64,
    pub power_on: bool,
}

/// Named pulse presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PulsePreset {
    CopMode,
    NewFollower,
    NewSubscriber,
}

impl PulsePreset {
    pub const ALL: [Self; 3] = [Self::CopMode, Self::NewFollower, Self::NewSubscriber];

    /// Spoken name of the preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CopMode => "cop mode",
            Self::NewFollower => "new follower",
            Self::NewSubscriber => "new subscriber",
        }
    }

    /// `(color, from_color)` of the preset.
    #[must_use]
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Self::CopMode => ("blue", "red"),
            Self::NewFollower => ("purple", "white"),
            Self::NewSubscriber => ("green", "purple"),
        }
    }

    /// Build fresh pulse parameters for this preset.
    #[must_use]
    pub fn params(self, settings: EffectSettings) -> PulseEffect {
        let (color, from_color) = self.colors();
        PulseEffect {
            color: color.to_string(),
            from_color: from_color.to_string(),
            period: settings.period,
            cycles: settings.cycles,
            power_on: true,
        }
    }
}

impl fmt::Display for PulsePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spoken names that select the continuous color cycle.
const CYCLE_NAMES: [&str; 4] = ["cycle", "color cycle", "colour cycle", "rainbow"];

/// Effect-state values that stop the color cycle.
const STOP_WORDS: [&str; 5] = ["off", "stop", "disable", "disabled", "end"];

/// An effect lightbot knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Pulse(PulsePreset),
    Cycle,
}

impl Effect {
    /// Look up an effect by its spoken name (trimmed, case-insensitive).
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        if CYCLE_NAMES.contains(&name.as_str()) {
            return Some(Self::Cycle);
        }
        PulsePreset::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .map(Self::Pulse)
    }
}

/// Requested transition for the color cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleToggle {
    Start,
    Stop,
}

impl CycleToggle {
    /// Interpret the optional `effect_state` slot value.
    #[must_use]
    pub fn from_effect_state(value: Option<&str>) -> Self {
        match value {
            Some(value) if STOP_WORDS.contains(&value.trim().to_lowercase().as_str()) => {
                Self::Stop
            }
            _ => Self::Start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_cop_mode_params_from_settings() {
        let settings = EffectSettings::new(2.0, 10.0).unwrap();
        let params = PulsePreset::CopMode.params(settings);
        assert_eq!(
            params,
            PulseEffect {
                color: "blue".to_string(),
                from_color: "red".to_string(),
                period: 2.0,
                cycles: 10.0,
                power_on: true,
            }
        );
    }

    #[test]
    fn should_build_independent_params_per_call() {
        let mut first = PulsePreset::NewFollower.params(EffectSettings::default());
        first.period = 99.0;
        let second = PulsePreset::NewFollower.params(EffectSettings::default());
        assert!((second.period - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_lookup_presets_case_insensitively() {
        assert_eq!(
            Effect::lookup(" Cop Mode "),
            Some(Effect::Pulse(PulsePreset::CopMode))
        );
        assert_eq!(
            Effect::lookup("new subscriber"),
            Some(Effect::Pulse(PulsePreset::NewSubscriber))
        );
    }

    #[test]
    fn should_lookup_cycle_aliases() {
        assert_eq!(Effect::lookup("cycle"), Some(Effect::Cycle));
        assert_eq!(Effect::lookup("Colour Cycle"), Some(Effect::Cycle));
        assert_eq!(Effect::lookup("rainbow"), Some(Effect::Cycle));
    }

    #[test]
    fn should_return_none_for_unsupported_effect() {
        assert_eq!(Effect::lookup("unknown-effect"), None);
    }

    #[test]
    fn should_reject_non_positive_settings() {
        assert!(EffectSettings::new(0.0, 5.0).is_err());
        assert!(EffectSettings::new(1.0, -1.0).is_err());
        assert!(EffectSettings::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn should_stop_cycle_on_stop_words() {
        assert_eq!(CycleToggle::from_effect_state(Some("OFF")), CycleToggle::Stop);
        assert_eq!(
            CycleToggle::from_effect_state(Some("disable")),
            CycleToggle::Stop
        );
    }

    #[test]
    fn should_start_cycle_by_default() {
        assert_eq!(CycleToggle::from_effect_state(None), CycleToggle::Start);
        assert_eq!(CycleToggle::from_effect_state(Some("on")), CycleToggle::Start);
    }
}
