//! Virtual bulb — remembers power, color, brightness and hue.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lightbot_domain::effect::PulseEffect;
use lightbot_domain::light::{LightResult, LightState, Power, StateDelta};

/// Observable state of a virtual bulb.
#[derive(Debug, Clone, PartialEq)]
pub struct BulbState {
    pub power: Power,
    /// Last color string applied, verbatim.
    pub color: Option<String>,
    pub brightness: f64,
    /// Hue in degrees, `0.0..360.0`.
    pub hue: f64,
    /// Number of pulse effects run on this bulb.
    pub pulses: u32,
}

impl Default for BulbState {
    fn default() -> Self {
        Self {
            power: Power::Off,
            color: None,
            brightness: 1.0,
            hue: 0.0,
            pulses: 0,
        }
    }
}

/// A simulated bulb addressable by id, label or group.
#[derive(Debug)]
pub struct VirtualBulb {
    id: String,
    label: String,
    group: String,
    state: Mutex<BulbState>,
}

impl VirtualBulb {
    pub fn new(id: impl Into<String>, label: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            group: group.into(),
            state: Mutex::new(BulbState::default()),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this bulb is matched by a LIFX-style selector.
    ///
    /// Supports `all`, `id:<id>`, `label:<label>` and `group:<group>`;
    /// labels and groups compare case-insensitively.
    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        if selector == "all" {
            return true;
        }
        match selector.split_once(':') {
            Some(("id", id)) => self.id == id,
            Some(("label", label)) => self.label.eq_ignore_ascii_case(label),
            Some(("group", group)) => self.group.eq_ignore_ascii_case(group),
            _ => false,
        }
    }

    #[must_use]
    pub fn state(&self) -> BulbState {
        self.lock().clone()
    }

    pub(crate) fn apply_state(&self, target: &LightState) -> LightResult {
        let mut state = self.lock();
        state.power = target.power;
        if let Some(color) = &target.color {
            if let Some(hue) = parse_hue(color) {
                state.hue = hue;
            }
            state.color = Some(color.clone());
        }
        if let Some(brightness) = target.brightness {
            state.brightness = brightness.clamp(0.0, 1.0);
        }
        self.result()
    }

    pub(crate) fn apply_pulse(&self, effect: &PulseEffect) -> LightResult {
        let mut state = self.lock();
        if effect.power_on {
            state.power = Power::On;
        }
        state.pulses += 1;
        self.result()
    }

    pub(crate) fn apply_delta(&self, delta: &StateDelta) -> LightResult {
        let mut state = self.lock();
        if let Some(hue) = delta.hue {
            state.hue = (state.hue + hue).rem_euclid(360.0);
        }
        self.result()
    }

    fn result(&self) -> LightResult {
        LightResult {
            id: self.id.clone(),
            label: self.label.clone(),
            status: "ok".to_string(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BulbState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hue of a color string such as `hue:120 saturation:1.0`.
fn parse_hue(color: &str) -> Option<f64> {
    color
        .split_whitespace()
        .find_map(|part| part.strip_prefix("hue:"))
        .and_then(|value| value.parse::<f64>().ok())
        .map(|hue| hue.rem_euclid(360.0))
}
