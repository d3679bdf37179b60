//! Request and response bodies of the LIFX HTTP API.

use serde::{Deserialize, Serialize};

use lightbot_domain::effect::PulseEffect;
use lightbot_domain::light::{LightResult, LightState, Power, StateDelta};

/// Body of `PUT /lights/{selector}/state`.
#[derive(Debug, Serialize)]
pub(crate) struct SetStateBody<'a> {
    power: Power,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
}

impl<'a> From<&'a LightState> for SetStateBody<'a> {
    fn from(state: &'a LightState) -> Self {
        Self {
            power: state.power,
            color: state.color.as_deref(),
            brightness: state.brightness,
            duration: state.duration,
        }
    }
}

/// Body of `POST /lights/{selector}/effects/pulse`.
#[derive(Debug, Serialize)]
pub(crate) struct PulseBody<'a> {
    color: &'a str,
    from_color: &'a str,
    period: f64,
    cycles: f64,
    power_on: bool,
}

impl<'a> From<&'a PulseEffect> for PulseBody<'a> {
    fn from(effect: &'a PulseEffect) -> Self {
        Self {
            color: &effect.color,
            from_color: &effect.from_color,
            period: effect.period,
            cycles: effect.cycles,
            power_on: effect.power_on,
        }
    }
}

/// Body of `POST /lights/{selector}/state/delta`.
#[derive(Debug, Serialize)]
pub(crate) struct DeltaBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    hue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
}

impl From<&StateDelta> for DeltaBody {
    fn from(delta: &StateDelta) -> Self {
        Self {
            hue: delta.hue,
            duration: delta.duration,
        }
    }
}

/// Successful response: one entry per bulb matched by the selector.
#[derive(Debug, Deserialize)]
pub(crate) struct ResultsBody {
    #[serde(default)]
    results: Vec<WireResult>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    id: String,
    #[serde(default)]
    label: String,
    status: String,
}

impl ResultsBody {
    pub(crate) fn into_results(self) -> Vec<LightResult> {
        self.results
            .into_iter()
            .map(|result| LightResult {
                id: result.id,
                label: result.label,
                status: result.status,
            })
            .collect()
    }
}

/// Error response, e.g. `{"error": "Invalid token"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}
