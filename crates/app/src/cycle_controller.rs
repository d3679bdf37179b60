//! Cycle controller — drives the per-conversation color cycle.
//!
//! Every cycle rotates the same selector, so at most one conversation owns a
//! live ticker at a time. Start, stop and interrupt requests from any
//! conversation act on that ticker. A conversation holds at most one pending
//! resume task. Tasks are identified by a controller-wide id; a task that wakes
//! up and finds it is no longer the registered one exits without touching
//! the lights, so an aborted or superseded task can never race a newer one.
//!
//! The session map is guarded by a [`std::sync::Mutex`] that is never held
//! across an `.await`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use lightbot_domain::cycle::{
    CycleSettings, CycleState, StartOutcome, StopOutcome, TickAction,
};
use lightbot_domain::error::LightBotError;
use lightbot_domain::id::ConversationId;
use lightbot_domain::light::{LightState, Power, Selector, StateDelta};

use crate::ports::LightingClient;

/// Observable state of one conversation's cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleStatus {
    pub state: CycleState,
    /// A restart is scheduled after an interruption.
    pub resume_pending: bool,
}

struct Task {
    id: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct CycleSession {
    state: CycleState,
    ticker: Option<Task>,
    resume: Option<Task>,
}

impl CycleSession {
    fn owns_ticker(&self, id: u64) -> bool {
        self.ticker.as_ref().is_some_and(|task| task.id == id)
    }

    fn owns_resume(&self, id: u64) -> bool {
        self.resume.as_ref().is_some_and(|task| task.id == id)
    }

    fn abort_ticker(&mut self) {
        if let Some(task) = self.ticker.take() {
            task.handle.abort();
        }
    }

    /// Cancel a pending resume, returning whether one was pending.
    fn cancel_resume(&mut self) -> bool {
        match self.resume.take() {
            Some(task) => {
                task.handle.abort();
                true
            }
            None => false,
        }
    }

    fn is_dormant(&self) -> bool {
        self.state == CycleState::Idle && self.ticker.is_none() && self.resume.is_none()
    }
}

struct Inner<L> {
    lights: L,
    selector: Selector,
    settings: CycleSettings,
    next_task_id: AtomicU64,
    sessions: Mutex<HashMap<ConversationId, CycleSession>>,
}

impl<L> Inner<L> {
    fn next_task_id(&self) -> u64 {
        self.next_task_id.fetch_add(1, Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ConversationId, CycleSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Per-conversation color cycle with pause/resume around one-shot commands.
pub struct CycleController<L> {
    inner: Arc<Inner<L>>,
}

impl<L> Clone for CycleController<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L> CycleController<L>
where
    L: LightingClient + Send + Sync + 'static,
{
    /// Create a controller driving the bulbs matching `selector`.
    pub fn new(lights: L, selector: Selector, settings: CycleSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                lights,
                selector,
                settings,
                next_task_id: AtomicU64::new(1),
                sessions: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Start (or re-arm) the cycle for `conversation`.
    ///
    /// A pending resume of `conversation` is cancelled. If another
    /// conversation already owns the ticker, that ticker is re-armed or left
    /// running and no second one is spawned. When a new ticker is spawned the
    /// initial color is set before returning.
    ///
    /// # Errors
    ///
    /// Returns the lighting error if the initial color cannot be set; the
    /// cycle is then back to idle.
    pub async fn start(
        &self,
        conversation: &ConversationId,
    ) -> Result<StartOutcome, LightBotError> {
        let spawned = {
            let mut sessions = self.inner.lock();
            if let Some(session) = sessions.get_mut(conversation) {
                session.cancel_resume();
            }
            let shared = sessions
                .iter_mut()
                .find(|(owner, session)| *owner != conversation && session.state.has_ticker())
                .map(|(owner, session)| {
                    let (next, outcome) = session.state.start();
                    session.state = next;
                    (owner.clone(), outcome)
                });
            if let Some((owner, outcome)) = shared {
                tracing::debug!(%conversation, %owner, ?outcome, "color cycle owned by another conversation");
                prune(&mut sessions, conversation);
                return Ok(outcome);
            }

            let session = sessions.entry(conversation.clone()).or_default();
            let (next, outcome) = session.state.start();
            session.state = next;
            if outcome != StartOutcome::Spawn {
                tracing::debug!(%conversation, ?outcome, "color cycle start ignored");
                return Ok(outcome);
            }
            let id = self.inner.next_task_id();
            let handle = tokio::spawn(run_ticker(
                Arc::clone(&self.inner),
                conversation.clone(),
                id,
            ));
            session.ticker = Some(Task { id, handle });
            id
        };

        let initial = LightState::power(Power::On).with_color(&self.inner.settings.initial_color);
        match self.inner.lights.set_state(&self.inner.selector, &initial).await {
            Ok(_) => {
                tracing::info!(%conversation, "color cycle started");
                Ok(StartOutcome::Spawn)
            }
            Err(err) => {
                let mut sessions = self.inner.lock();
                if let Some(session) = sessions.get_mut(conversation)
                    && session.owns_ticker(spawned)
                {
                    session.abort_ticker();
                    session.state = CycleState::Idle;
                }
                prune(&mut sessions, conversation);
                Err(err)
            }
        }
    }

    /// Request the cycle to stop on behalf of `conversation`.
    ///
    /// The live ticker, whichever conversation started it, ends itself on its
    /// next tick. Every pending resume is cancelled.
    pub fn stop(&self, conversation: &ConversationId) -> StopOutcome {
        let mut sessions = self.inner.lock();
        let mut outcome = StopOutcome::AlreadyStopped;
        for session in sessions.values_mut() {
            session.cancel_resume();
            if session.state.has_ticker() {
                let (next, stopped) = session.state.stop();
                session.state = next;
                outcome = stopped;
            }
        }
        sessions.retain(|_, session| !session.is_dormant());
        tracing::debug!(%conversation, ?outcome, "color cycle stop requested");
        outcome
    }

    /// Force the cycle off ahead of a one-shot command sent by
    /// `conversation`.
    ///
    /// The live ticker is aborted immediately so its next tick never sends a
    /// color. Returns the conversations whose cycle should be resumed
    /// afterwards: the one whose cycle was running, and any whose resume from
    /// an earlier interruption was still pending (that resume is cancelled).
    pub fn interrupt(&self, conversation: &ConversationId) -> Vec<ConversationId> {
        let mut sessions = self.inner.lock();
        let mut paused = Vec::new();
        for (owner, session) in sessions.iter_mut() {
            let (next, was_running) = session.state.interrupt();
            session.state = next;
            session.abort_ticker();
            let was_pending = session.cancel_resume();
            if was_running || was_pending {
                paused.push(owner.clone());
            }
        }
        sessions.retain(|_, session| !session.is_dormant());
        if !paused.is_empty() {
            tracing::debug!(%conversation, paused = paused.len(), "color cycle paused for one-shot command");
        }
        paused
    }

    /// Restart the cycle for `conversation` after the configured delay.
    ///
    /// Replaces any resume already pending for the same conversation.
    pub fn schedule_resume(&self, conversation: &ConversationId) {
        let mut sessions = self.inner.lock();
        let session = sessions.entry(conversation.clone()).or_default();
        session.cancel_resume();
        let id = self.inner.next_task_id();
        let handle = tokio::spawn(run_resume(self.clone(), conversation.clone(), id));
        session.resume = Some(Task { id, handle });
        tracing::debug!(
            %conversation,
            delay_secs = self.inner.settings.resume_delay.as_secs(),
            "color cycle resume scheduled"
        );
    }

    /// Current status of the cycle for `conversation`.
    #[must_use]
    pub fn status(&self, conversation: &ConversationId) -> CycleStatus {
        self.inner
            .lock()
            .get(conversation)
            .map(|session| CycleStatus {
                state: session.state,
                resume_pending: session.resume.is_some(),
            })
            .unwrap_or_default()
    }

    /// Abort every ticker and pending resume.
    pub fn shutdown(&self) {
        let mut sessions = self.inner.lock();
        for session in sessions.values_mut() {
            session.abort_ticker();
            session.cancel_resume();
        }
        let count = sessions.len();
        sessions.clear();
        tracing::debug!(count, "color cycle sessions stopped");
    }
}

fn prune(sessions: &mut HashMap<ConversationId, CycleSession>, conversation: &ConversationId) {
    if sessions.get(conversation).is_some_and(CycleSession::is_dormant) {
        sessions.remove(conversation);
    }
}

async fn run_ticker<L>(inner: Arc<Inner<L>>, conversation: ConversationId, id: u64)
where
    L: LightingClient + Send + Sync + 'static,
{
    let delta = StateDelta::hue(inner.settings.hue_delta);
    loop {
        tokio::time::sleep(inner.settings.tick).await;

        let action = {
            let mut sessions = inner.lock();
            let Some(session) = sessions.get_mut(&conversation) else {
                return;
            };
            if !session.owns_ticker(id) {
                return;
            }
            let (next, action) = session.state.tick();
            session.state = next;
            if action != TickAction::Rotate {
                session.ticker = None;
                prune(&mut sessions, &conversation);
            }
            action
        };

        match action {
            TickAction::Rotate => {
                if let Err(err) = inner.lights.set_delta(&inner.selector, &delta).await {
                    tracing::warn!(%conversation, error = %err, "color cycle tick failed");
                }
            }
            TickAction::Finish => {
                tracing::info!(%conversation, "color cycle stopped");
                return;
            }
            TickAction::Exit => return,
        }
    }
}

async fn run_resume<L>(controller: CycleController<L>, conversation: ConversationId, id: u64)
where
    L: LightingClient + Send + Sync + 'static,
{
    tokio::time::sleep(controller.inner.settings.resume_delay).await;

    {
        let mut sessions = controller.inner.lock();
        let Some(session) = sessions.get_mut(&conversation) else {
            return;
        };
        if !session.owns_resume(id) {
            return;
        }
        session.resume = None;
    }

    tracing::info!(%conversation, "resuming color cycle");
    if let Err(err) = controller.start(&conversation).await {
        tracing::error!(%conversation, error = %err, "failed to resume color cycle");
    }
}
