//! Light service — turns the slots of a `Lights` message into lighting calls.

use std::collections::HashMap;

use lightbot_domain::command::LightCommand;
use lightbot_domain::conversation::Turn;
use lightbot_domain::cycle::{CycleSettings, StartOutcome, StopOutcome};
use lightbot_domain::effect::{CycleToggle, Effect, EffectSettings, PulsePreset};
use lightbot_domain::error::LightBotError;
use lightbot_domain::id::ConversationId;
use lightbot_domain::light::{LightResult, LightState, Selector};
use lightbot_domain::messages;
use lightbot_domain::slot::Slots;

use crate::cycle_controller::{CycleController, CycleStatus};
use crate::ports::LightingClient;

/// Where commands are sent and how effects are timed.
#[derive(Debug, Clone)]
pub struct LightTargets {
    /// Selector used for effects, the cycle, and unmapped locations.
    pub default_selector: Selector,
    /// Spoken location → selector, keys compared case-insensitively.
    pub locations: HashMap<String, Selector>,
}

impl LightTargets {
    /// Target everything at `default_selector`.
    #[must_use]
    pub fn new(default_selector: Selector) -> Self {
        Self {
            default_selector,
            locations: HashMap::new(),
        }
    }

    /// Map a spoken location to its own selector.
    #[must_use]
    pub fn with_location(mut self, location: &str, selector: Selector) -> Self {
        self.locations.insert(location.trim().to_lowercase(), selector);
        self
    }

    /// Selector for a spoken location.
    #[must_use]
    pub fn resolve(&self, location: &str) -> &Selector {
        self.locations
            .get(&location.trim().to_lowercase())
            .unwrap_or(&self.default_selector)
    }
}

/// Application service handling the `Lights` intent.
pub struct LightService<L> {
    lights: L,
    cycle: CycleController<L>,
    targets: LightTargets,
    effects: EffectSettings,
}

impl<L> LightService<L>
where
    L: LightingClient + Clone + Send + Sync + 'static,
{
    /// Create a new service sending commands through `lights`.
    pub fn new(
        lights: L,
        targets: LightTargets,
        effects: EffectSettings,
        cycle_settings: CycleSettings,
    ) -> Self {
        let cycle = CycleController::new(
            lights.clone(),
            targets.default_selector.clone(),
            cycle_settings,
        );
        Self {
            lights,
            cycle,
            targets,
            effects,
        }
    }

    /// Handle a `Lights` message: acknowledge, resolve the command, run it.
    pub async fn handle(&self, conversation: &ConversationId, slots: &Slots, turn: &mut Turn) {
        turn.send(messages::LIGHTS_ACKNOWLEDGE);

        match LightCommand::from_slots(slots) {
            LightCommand::SetState { location, state } => {
                self.control_lights(conversation, &location, &state, turn)
                    .await;
            }
            LightCommand::Effect { name, toggle } => {
                self.trigger_effect(conversation, &name, toggle, turn).await;
            }
            LightCommand::NotUnderstood => {
                tracing::debug!(%conversation, slots = slots.len(), "light command not understood");
                turn.send_and_end(messages::COMMAND_NOT_UNDERSTOOD);
            }
        }
    }

    /// Cycle status for `conversation`.
    #[must_use]
    pub fn cycle_status(&self, conversation: &ConversationId) -> CycleStatus {
        self.cycle.status(conversation)
    }

    /// Stop every running cycle.
    pub fn shutdown(&self) {
        self.cycle.shutdown();
    }

    async fn control_lights(
        &self,
        conversation: &ConversationId,
        location: &str,
        state: &LightState,
        turn: &mut Turn,
    ) {
        let selector = self.targets.resolve(location);
        let message =
            messages::state_changed(location, &state.power.to_string(), state.color.as_deref());
        tracing::info!(%conversation, location, %selector, power = %state.power, color = ?state.color, "setting light state");

        let paused = self.cycle.interrupt(conversation);
        let result = self.lights.set_state(selector, state).await;
        deliver(conversation, result, message, turn);
        for owner in &paused {
            self.cycle.schedule_resume(owner);
        }
    }

    async fn trigger_effect(
        &self,
        conversation: &ConversationId,
        name: &str,
        toggle: CycleToggle,
        turn: &mut Turn,
    ) {
        tracing::info!(%conversation, effect = name, "effect requested");

        match Effect::lookup(name) {
            Some(Effect::Pulse(preset)) => self.pulse(conversation, name, preset, turn).await,
            Some(Effect::Cycle) => self.toggle_cycle(conversation, toggle, turn).await,
            None => {
                let warning = messages::unsupported_effect(name);
                tracing::warn!(%conversation, effect = name, "unsupported effect");
                turn.send_and_end(warning);
            }
        }
    }

    async fn pulse(
        &self,
        conversation: &ConversationId,
        name: &str,
        preset: PulsePreset,
        turn: &mut Turn,
    ) {
        let params = preset.params(self.effects);
        let selector = &self.targets.default_selector;
        tracing::info!(%conversation, %preset, %selector, "initiating pulse effect");

        let paused = self.cycle.interrupt(conversation);
        let result = self.lights.pulse(selector, &params).await;
        deliver(conversation, result, messages::effect_started(name), turn);
        for owner in &paused {
            self.cycle.schedule_resume(owner);
        }
    }

    async fn toggle_cycle(&self, conversation: &ConversationId, toggle: CycleToggle, turn: &mut Turn) {
        match toggle {
            CycleToggle::Start => match self.cycle.start(conversation).await {
                Ok(StartOutcome::Spawn | StartOutcome::Rearmed) => {
                    turn.send_and_end(messages::CYCLE_ENABLED);
                }
                Ok(StartOutcome::AlreadyRunning) => {
                    turn.send_and_end(messages::CYCLE_ALREADY_ENABLED);
                }
                Err(err) => {
                    tracing::error!(%conversation, error = %err, "failed to start color cycle");
                    turn.send_and_end(messages::lighting_failed(&err));
                }
            },
            CycleToggle::Stop => {
                if self.cycle.stop(conversation) == StopOutcome::AlreadyStopped {
                    tracing::debug!(%conversation, "color cycle was not running");
                }
                turn.send_and_end(messages::CYCLE_DISABLED);
            }
        }
    }
}

fn deliver(
    conversation: &ConversationId,
    result: Result<Vec<LightResult>, LightBotError>,
    message: String,
    turn: &mut Turn,
) {
    match result {
        Ok(results) => {
            let failed = results.iter().filter(|result| !result.is_ok()).count();
            tracing::debug!(%conversation, bulbs = results.len(), failed, "lighting call completed");
            turn.send_and_end(message);
        }
        Err(err) => {
            tracing::error!(%conversation, error = %err, "lighting call failed");
            turn.send_and_end(messages::lighting_failed(&err));
        }
    }
}
