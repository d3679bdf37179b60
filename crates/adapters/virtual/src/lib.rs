//! # lightbot-adapter-virtual
//!
//! Virtual/demo lighting adapter with simulated bulbs, used when no LIFX
//! account is configured and by end-to-end tests.
//!
//! ## Provided bulbs
//!
//! | Id | Label | Group |
//! |----|-------|-------|
//! | `d073d5000001` | `Bottom Bulb` | `Living Room` |
//! | `d073d5000002` | `Kitchen` | `Kitchen` |
//!
//! Selectors follow the LIFX syntax (`all`, `id:`, `label:`, `group:`). A
//! selector matching no bulb fails like the real API does.
//!
//! ## Dependency rule
//!
//! Depends on `lightbot-app` (port traits) and `lightbot-domain` only.

mod bulb;

pub use bulb::{BulbState, VirtualBulb};

use std::sync::Arc;

use lightbot_app::ports::LightingClient;
use lightbot_domain::effect::PulseEffect;
use lightbot_domain::error::LightBotError;
use lightbot_domain::light::{LightResult, LightState, Selector, StateDelta};

/// Errors raised by the virtual lights.
#[derive(Debug, thiserror::Error)]
pub enum VirtualError {
    #[error("404 Not Found Could not find selector: {0}")]
    UnknownSelector(String),
}

impl From<VirtualError> for LightBotError {
    fn from(err: VirtualError) -> Self {
        LightBotError::Lighting(Box::new(err))
    }
}

/// In-memory set of bulbs implementing [`LightingClient`]. Clones share bulbs.
#[derive(Debug, Clone)]
pub struct VirtualLights {
    bulbs: Arc<Vec<VirtualBulb>>,
}

impl Default for VirtualLights {
    fn default() -> Self {
        Self::new(vec![
            VirtualBulb::new("d073d5000001", "Bottom Bulb", "Living Room"),
            VirtualBulb::new("d073d5000002", "Kitchen", "Kitchen"),
        ])
    }
}

impl VirtualLights {
    #[must_use]
    pub fn new(bulbs: Vec<VirtualBulb>) -> Self {
        Self {
            bulbs: Arc::new(bulbs),
        }
    }

    /// Current state of the bulb labelled `label`.
    #[must_use]
    pub fn bulb(&self, label: &str) -> Option<BulbState> {
        self.bulbs
            .iter()
            .find(|bulb| bulb.label().eq_ignore_ascii_case(label))
            .map(VirtualBulb::state)
    }

    fn apply(
        &self,
        selector: &Selector,
        op: impl Fn(&VirtualBulb) -> LightResult,
    ) -> Result<Vec<LightResult>, VirtualError> {
        let results: Vec<LightResult> = self
            .bulbs
            .iter()
            .filter(|bulb| bulb.matches(selector.as_str()))
            .map(op)
            .collect();
        if results.is_empty() {
            return Err(VirtualError::UnknownSelector(selector.to_string()));
        }
        Ok(results)
    }
}

impl LightingClient for VirtualLights {
    async fn set_state(
        &self,
        selector: &Selector,
        state: &LightState,
    ) -> Result<Vec<LightResult>, LightBotError> {
        tracing::debug!(%selector, power = %state.power, color = ?state.color, "virtual set state");
        Ok(self.apply(selector, |bulb| bulb.apply_state(state))?)
    }

    async fn pulse(
        &self,
        selector: &Selector,
        effect: &PulseEffect,
    ) -> Result<Vec<LightResult>, LightBotError> {
        tracing::debug!(%selector, color = %effect.color, from_color = %effect.from_color, "virtual pulse");
        Ok(self.apply(selector, |bulb| bulb.apply_pulse(effect))?)
    }

    async fn set_delta(
        &self,
        selector: &Selector,
        delta: &StateDelta,
    ) -> Result<Vec<LightResult>, LightBotError> {
        tracing::debug!(%selector, hue = ?delta.hue, "virtual state delta");
        Ok(self.apply(selector, |bulb| bulb.apply_delta(delta))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightbot_domain::light::Power;

    fn selector(value: &str) -> Selector {
        Selector::new(value).unwrap()
    }

    #[tokio::test]
    async fn should_turn_on_only_matching_bulb() {
        let lights = VirtualLights::default();

        let results = lights
            .set_state(&selector("label:Kitchen"), &LightState::power(Power::On))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Kitchen");
        assert_eq!(lights.bulb("Kitchen").unwrap().power, Power::On);
        assert_eq!(lights.bulb("Bottom Bulb").unwrap().power, Power::Off);
    }

    #[tokio::test]
    async fn should_address_every_bulb_with_all() {
        let lights = VirtualLights::default();

        let results = lights
            .set_delta(&selector("all"), &StateDelta::hue(30.0))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(LightResult::is_ok));
    }

    #[tokio::test]
    async fn should_fail_for_unknown_selector() {
        let lights = VirtualLights::default();

        let err = lights
            .set_state(&selector("label:Attic"), &LightState::power(Power::On))
            .await
            .unwrap_err();

        assert!(matches!(err, LightBotError::Lighting(_)));
        assert_eq!(
            err.to_string(),
            "404 Not Found Could not find selector: label:Attic"
        );
    }

    #[tokio::test]
    async fn should_share_bulbs_between_clones() {
        let lights = VirtualLights::default();
        let clone = lights.clone();

        clone
            .pulse(
                &selector("label:Bottom Bulb"),
                &PulseEffect {
                    color: "green".to_string(),
                    from_color: "purple".to_string(),
                    period: 1.0,
                    cycles: 5.0,
                    power_on: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(lights.bulb("Bottom Bulb").unwrap().pulses, 1);
    }
}
