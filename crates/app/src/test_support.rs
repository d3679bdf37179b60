//! Test doubles shared by the use-case tests.

use std::sync::Mutex;

use lightbot_domain::effect::PulseEffect;
use lightbot_domain::error::LightBotError;
use lightbot_domain::intent::Recognition;
use lightbot_domain::light::{LightResult, LightState, Selector, StateDelta};

use crate::ports::{LightingClient, Recognizer};

#[derive(Debug, Clone, PartialEq)]
pub enum LightCall {
    SetState { selector: String, state: LightState },
    Pulse { selector: String, effect: PulseEffect },
    SetDelta { selector: String, delta: StateDelta },
}

/// Lighting client that records every call and optionally fails them all.
#[derive(Default)]
pub struct RecordingLights {
    calls: Mutex<Vec<LightCall>>,
    failure: Option<String>,
}

impl RecordingLights {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::default(),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<LightCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn state_calls(&self) -> usize {
        self.count(|call| matches!(call, LightCall::SetState { .. }))
    }

    pub fn pulse_calls(&self) -> usize {
        self.count(|call| matches!(call, LightCall::Pulse { .. }))
    }

    pub fn delta_calls(&self) -> usize {
        self.count(|call| matches!(call, LightCall::SetDelta { .. }))
    }

    fn count(&self, pred: impl Fn(&LightCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: LightCall) -> Result<Vec<LightResult>, LightBotError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(message) => Err(LightBotError::Lighting(message.clone().into())),
            None => Ok(vec![LightResult {
                id: "d073d5000001".to_string(),
                label: "Bottom Bulb".to_string(),
                status: "ok".to_string(),
            }]),
        }
    }
}

impl LightingClient for RecordingLights {
    async fn set_state(
        &self,
        selector: &Selector,
        state: &LightState,
    ) -> Result<Vec<LightResult>, LightBotError> {
        self.record(LightCall::SetState {
            selector: selector.to_string(),
            state: state.clone(),
        })
    }

    async fn pulse(
        &self,
        selector: &Selector,
        effect: &PulseEffect,
    ) -> Result<Vec<LightResult>, LightBotError> {
        self.record(LightCall::Pulse {
            selector: selector.to_string(),
            effect: effect.clone(),
        })
    }

    async fn set_delta(
        &self,
        selector: &Selector,
        delta: &StateDelta,
    ) -> Result<Vec<LightResult>, LightBotError> {
        self.record(LightCall::SetDelta {
            selector: selector.to_string(),
            delta: delta.clone(),
        })
    }
}

/// Recognizer that always returns the same result.
pub struct FixedRecognizer(pub Recognition);

impl Recognizer for FixedRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Recognition, LightBotError> {
        Ok(self.0.clone())
    }
}

/// Recognizer that always fails.
pub struct FailingRecognizer;

impl Recognizer for FailingRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Recognition, LightBotError> {
        Err(LightBotError::Recognition("service unavailable".into()))
    }
}
