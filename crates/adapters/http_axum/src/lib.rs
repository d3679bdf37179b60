//! # lightbot-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Receive bot-channel activities on `POST /api/messages` and answer with
//!   the replies of the turn
//! - Expose the color cycle status of a conversation for inspection
//! - Map application errors into HTTP status codes with a JSON `{error}` body
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `GET` | `/health` | Liveness probe, answers `OK` |
//! | `POST` | `/api/messages` | Handle one activity |
//! | `GET` | `/api/conversations/{id}/cycle` | Color cycle status |
//!
//! ## Dependency rule
//! Depends on `lightbot-app` (for port traits and services) and
//! `lightbot-domain` (for request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
