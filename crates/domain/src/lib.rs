//! # lightbot-domain
//!
//! Pure domain model for the lightbot conversational light controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Intents** and **Entity slots** produced by the NLU service
//! - Define **Light commands** (absolute state, relative delta, pulse)
//! - Resolve slots into a [`command::LightCommand`] (the command builder)
//! - Define the **Color cycle** state machine
//! - Hold every user-facing reply text
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod command;
pub mod conversation;
pub mod cycle;
pub mod effect;
pub mod intent;
pub mod light;
pub mod messages;
pub mod slot;
