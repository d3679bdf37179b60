//! Lighting port — commands sent to the lighting vendor.
//!
//! Every operation is a single attempt: no retry, no fallback. Failures are
//! reported to the caller, which surfaces them to the user.

use std::future::Future;

use lightbot_domain::effect::PulseEffect;
use lightbot_domain::error::LightBotError;
use lightbot_domain::light::{LightResult, LightState, Selector, StateDelta};

/// Client for the lighting vendor API.
pub trait LightingClient {
    /// Set an absolute state on the bulbs matching `selector`.
    fn set_state(
        &self,
        selector: &Selector,
        state: &LightState,
    ) -> impl Future<Output = Result<Vec<LightResult>, LightBotError>> + Send;

    /// Oscillate the bulbs between two colors.
    fn pulse(
        &self,
        selector: &Selector,
        effect: &PulseEffect,
    ) -> impl Future<Output = Result<Vec<LightResult>, LightBotError>> + Send;

    /// Apply a relative change (e.g. rotate hue) to the bulbs.
    fn set_delta(
        &self,
        selector: &Selector,
        delta: &StateDelta,
    ) -> impl Future<Output = Result<Vec<LightResult>, LightBotError>> + Send;
}

impl<T: LightingClient + Send + Sync> LightingClient for std::sync::Arc<T> {
    fn set_state(
        &self,
        selector: &Selector,
        state: &LightState,
    ) -> impl Future<Output = Result<Vec<LightResult>, LightBotError>> + Send {
        (**self).set_state(selector, state)
    }

    fn pulse(
        &self,
        selector: &Selector,
        effect: &PulseEffect,
    ) -> impl Future<Output = Result<Vec<LightResult>, LightBotError>> + Send {
        (**self).pulse(selector, effect)
    }

    fn set_delta(
        &self,
        selector: &Selector,
        delta: &StateDelta,
    ) -> impl Future<Output = Result<Vec<LightResult>, LightBotError>> + Send {
        (**self).set_delta(selector, delta)
    }
}
