//! # lightbot-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Recognizer` — intent and entity extraction (NLU)
//!   - `LightingClient` — set state, pulse, and set delta on bulbs
//! - Define **driving/inbound** use-cases:
//!   - `ConversationService` — recognize a message and produce a turn
//!   - `IntentRouter` — dispatch a recognized intent to its handler
//!   - `LightService` — turn `Lights` slots into lighting calls
//!   - `CycleController` — per-conversation color cycle with pause/resume
//! - Orchestrate domain objects without knowing *how* IO works
//!
//! ## Dependency rule
//! Depends on `lightbot-domain` only (plus `tokio` for tasks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod cycle_controller;
pub mod intent_router;
pub mod ports;
pub mod services;

#[cfg(test)]
mod test_support;
