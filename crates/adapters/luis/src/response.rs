//! LUIS v2 endpoint response.

use serde::Deserialize;

use lightbot_domain::intent::{Intent, Recognition};
use lightbot_domain::slot::{EntitySlot, Slots};

/// Confidence assumed for entities reported without a score.
const DEFAULT_ENTITY_SCORE: f64 = 1.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LuisResponse {
    #[serde(default)]
    top_scoring_intent: Option<ScoredIntent>,
    /// Only present when the request asked for verbose output.
    #[serde(default)]
    intents: Vec<ScoredIntent>,
    #[serde(default)]
    entities: Vec<LuisEntity>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScoredIntent {
    intent: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct LuisEntity {
    entity: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    score: Option<f64>,
}

impl LuisResponse {
    fn top_intent(&self) -> Option<&ScoredIntent> {
        self.top_scoring_intent.as_ref().or_else(|| {
            self.intents
                .iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
        })
    }

    pub(crate) fn into_recognition(self) -> Recognition {
        let (intent, score) = self
            .top_intent()
            .map_or((Intent::None, 0.0), |top| {
                (Intent::from_name(&top.intent), top.score)
            });
        let slots: Slots = self
            .entities
            .into_iter()
            .map(|entity| {
                EntitySlot::new(
                    entity.kind,
                    entity.entity,
                    entity.score.unwrap_or(DEFAULT_ENTITY_SCORE),
                )
            })
            .collect();
        Recognition::new(intent, score, slots)
    }
}

/// Message of an error body; LUIS uses both `{message}` and `{error: {message}}`.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error").and_then(|error| error.get("message")))
                .and_then(serde_json::Value::as_str)
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
