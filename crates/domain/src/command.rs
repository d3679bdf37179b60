//! Light command builder — turns extracted slots into a concrete command.
//!
//! Resolution rules, in order:
//!
//! 1. Colors are normalized by stripping whitespace; two or more distinct
//!    colors make the request ambiguous for a direct state change.
//! 2. An explicit `state` slot wins. Without one, a color implies `on`.
//! 3. Without a location, a color targets the generic [`DEFAULT_LOCATION`].
//! 4. Location + state (and no color conflict) → [`LightCommand::SetState`].
//! 5. Otherwise an `effect` slot → [`LightCommand::Effect`].
//! 6. Otherwise → [`LightCommand::NotUnderstood`].

use crate::effect::CycleToggle;
use crate::light::{LightState, Power};
use crate::slot::{SLOT_COLOR, SLOT_EFFECT, SLOT_EFFECT_STATE, SLOT_LOCATION, SLOT_STATE, Slots};

/// Location used when a color is given without saying which light.
pub const DEFAULT_LOCATION: &str = "light";

/// Brightness applied when a light is switched on directly.
pub const DIRECT_BRIGHTNESS: f64 = 1.0;

/// Transition, in seconds, applied when a light is switched on directly.
pub const DIRECT_DURATION: f64 = 1.0;

/// What a `Lights` message asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum LightCommand {
    /// Set an absolute state on the light at `location`.
    SetState { location: String, state: LightState },
    /// Run (or toggle) the named effect.
    Effect { name: String, toggle: CycleToggle },
    /// Slots were missing or ambiguous.
    NotUnderstood,
}

impl LightCommand {
    /// Resolve the command described by `slots`.
    #[must_use]
    pub fn from_slots(slots: &Slots) -> Self {
        let colors = distinct_colors(slots);
        let color = colors.first().cloned();
        let conflicting = colors.len() >= 2;

        let explicit = slots
            .value(SLOT_STATE)
            .and_then(|value| value.parse::<Power>().ok());
        let power = explicit.or_else(|| color.as_ref().map(|_| Power::On));

        let location = slots
            .value(SLOT_LOCATION)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
            .or_else(|| color.as_ref().map(|_| DEFAULT_LOCATION.to_string()));

        if let (Some(location), Some(power), false) = (location, power, conflicting) {
            return Self::SetState {
                location,
                state: direct_state(power, color),
            };
        }

        if let Some(name) = slots.value(SLOT_EFFECT) {
            return Self::Effect {
                name: name.to_string(),
                toggle: CycleToggle::from_effect_state(slots.value(SLOT_EFFECT_STATE)),
            };
        }

        Self::NotUnderstood
    }
}

/// Strip every whitespace character; the NLU splits hex codes like `# ff 0000`.
#[must_use]
pub fn normalize_color(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn distinct_colors(slots: &Slots) -> Vec<String> {
    let mut colors: Vec<String> = Vec::new();
    for slot in slots.find_all(SLOT_COLOR) {
        let color = normalize_color(&slot.value);
        if !color.is_empty() && !colors.iter().any(|c| c.eq_ignore_ascii_case(&color)) {
            colors.push(color);
        }
    }
    colors
}

fn direct_state(power: Power, color: Option<String>) -> LightState {
    match power {
        Power::Off => LightState::power(Power::Off),
        Power::On => {
            let state = LightState::power(Power::On)
                .with_brightness(DIRECT_BRIGHTNESS)
                .with_duration(DIRECT_DURATION);
            match color {
                Some(color) => state.with_color(color),
                None => state,
            }
        }
    }
}
