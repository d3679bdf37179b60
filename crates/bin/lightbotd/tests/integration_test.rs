//! End-to-end smoke tests for the full lightbotd stack.
//!
//! Each test spins up the complete application (scripted recognizer, virtual
//! lights, real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lightbot_adapter_http_axum::router;
use lightbot_adapter_http_axum::state::AppState;
use lightbot_adapter_virtual::VirtualLights;
use lightbot_app::intent_router::IntentRouter;
use lightbot_app::ports::Recognizer;
use lightbot_app::services::conversation_service::ConversationService;
use lightbot_app::services::light_service::{LightService, LightTargets};
use lightbot_domain::cycle::CycleSettings;
use lightbot_domain::effect::EffectSettings;
use lightbot_domain::error::LightBotError;
use lightbot_domain::intent::{Intent, Recognition};
use lightbot_domain::light::{Power, Selector};
use lightbot_domain::slot::{EntitySlot, SLOT_COLOR, SLOT_EFFECT, SLOT_LOCATION, SLOT_STATE, Slots};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Recognizer answering from a fixed phrase book, like a trained model would.
struct PhraseBook;

impl Recognizer for PhraseBook {
    async fn recognize(&self, text: &str) -> Result<Recognition, LightBotError> {
        let slot = |name: &str, value: &str| EntitySlot::new(name, value, 0.9);
        let recognition = match text {
            "hello" => Recognition::new(Intent::Greeting, 0.95, Slots::default()),
            "help" => Recognition::new(Intent::Help, 0.95, Slots::default()),
            "turn the kitchen off" => Recognition::new(
                Intent::Lights,
                0.9,
                vec![slot(SLOT_LOCATION, "kitchen"), slot(SLOT_STATE, "off")].into(),
            ),
            "turn the kitchen on" => Recognition::new(
                Intent::Lights,
                0.9,
                vec![slot(SLOT_LOCATION, "kitchen"), slot(SLOT_STATE, "on")].into(),
            ),
            "make it blue" => Recognition::new(
                Intent::Lights,
                0.9,
                vec![slot(SLOT_COLOR, "blue")].into(),
            ),
            "cop mode" => Recognition::new(
                Intent::Lights,
                0.9,
                vec![slot(SLOT_EFFECT, "cop mode")].into(),
            ),
            "rainbow" => Recognition::new(
                Intent::Lights,
                0.9,
                vec![slot(SLOT_EFFECT, "rainbow")].into(),
            ),
            "disco" => Recognition::new(
                Intent::Lights,
                0.9,
                vec![slot(SLOT_EFFECT, "disco")].into(),
            ),
            _ => Recognition::new(Intent::None, 0.3, Slots::default()),
        };
        Ok(recognition)
    }
}

/// Build a fully-wired router backed by virtual lights.
fn app(lights: &VirtualLights) -> axum::Router {
    let targets = LightTargets::new(Selector::new("label:Bottom Bulb").unwrap())
        .with_location("kitchen", Selector::new("group:Kitchen").unwrap());
    let light_service = LightService::new(
        lights.clone(),
        targets,
        EffectSettings::default(),
        CycleSettings::default(),
    );
    let service = ConversationService::new(PhraseBook, IntentRouter::new(light_service, 0.1));
    router::build(AppState::new(Arc::new(service), None))
}

async fn say(app: &axum::Router, conversation: &str, text: &str) -> Value {
    let body = json!({ "type": "message", "text": text, "conversation": { "id": conversation } });
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/messages")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn texts(body: &Value) -> Vec<&str> {
    body["replies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|reply| reply["text"].as_str().unwrap())
        .collect()
}

async fn cycle_state(app: &axum::Router, conversation: &str) -> Value {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/conversations/{conversation}/cycle"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app(&VirtualLights::default())
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_greet_and_help() {
    let app = app(&VirtualLights::default());

    assert_eq!(texts(&say(&app, "c1", "hello").await), vec!["Sup, yo!"]);
    let help = say(&app, "c1", "help").await;
    assert!(texts(&help)[0].starts_with("I can control the lights in your house."));
    assert_eq!(help["end_dialog"], false);
}

#[tokio::test]
async fn should_echo_unrecognized_text() {
    let app = app(&VirtualLights::default());

    let body = say(&app, "c1", "order a pizza").await;

    assert_eq!(
        texts(&body),
        vec!["Sorry, I did not understand 'order a pizza'."]
    );
    assert_eq!(body["end_dialog"], true);
}

// ---------------------------------------------------------------------------
// Lights
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_turn_kitchen_off() {
    let lights = VirtualLights::default();
    let app = app(&lights);
    say(&app, "c1", "make it blue").await;
    say(&app, "c1", "turn the kitchen on").await;
    assert_eq!(lights.bulb("Kitchen").unwrap().power, Power::On);

    let body = say(&app, "c1", "turn the kitchen off").await;

    assert_eq!(
        texts(&body),
        vec!["OK! One sec...", "The kitchen was turned off"]
    );
    assert_eq!(lights.bulb("Kitchen").unwrap().power, Power::Off);
    assert_eq!(lights.bulb("Bottom Bulb").unwrap().power, Power::On);
}

#[tokio::test]
async fn should_set_color_on_default_bulb() {
    let lights = VirtualLights::default();
    let app = app(&lights);

    let body = say(&app, "c1", "make it blue").await;

    assert_eq!(
        texts(&body)[1],
        "The light was turned on and was set to blue"
    );
    let bulb = lights.bulb("Bottom Bulb").unwrap();
    assert_eq!(bulb.power, Power::On);
    assert_eq!(bulb.color.as_deref(), Some("blue"));
}

#[tokio::test]
async fn should_pulse_cop_mode() {
    let lights = VirtualLights::default();
    let app = app(&lights);

    let body = say(&app, "c1", "cop mode").await;

    assert_eq!(texts(&body)[1], "Successfully initiated \"cop mode\" effect");
    assert_eq!(lights.bulb("Bottom Bulb").unwrap().pulses, 1);
}

#[tokio::test]
async fn should_refuse_unsupported_effect() {
    let lights = VirtualLights::default();
    let app = app(&lights);

    let body = say(&app, "c1", "disco").await;

    assert_eq!(texts(&body)[1], "Received an unsupported effect: disco");
    assert_eq!(lights.bulb("Bottom Bulb").unwrap().power, Power::Off);
}

// ---------------------------------------------------------------------------
// Color cycle
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_rotate_hue_and_pause_for_one_shot_command() {
    let lights = VirtualLights::default();
    let app = app(&lights);

    let body = say(&app, "c1", "rainbow").await;
    assert_eq!(texts(&body)[1], "Color cycle enabled");
    assert_eq!(cycle_state(&app, "c1").await["state"], "running");

    tokio::time::sleep(Duration::from_secs(13)).await;
    let hue = lights.bulb("Bottom Bulb").unwrap().hue;
    assert!((hue - 60.0).abs() < f64::EPSILON);

    say(&app, "c1", "cop mode").await;
    let status = cycle_state(&app, "c1").await;
    assert_eq!(status["state"], "idle");
    assert_eq!(status["resume_pending"], true);

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(cycle_state(&app, "c1").await["state"], "running");
}

#[tokio::test(start_paused = true)]
async fn should_report_cycle_already_enabled() {
    let app = app(&VirtualLights::default());

    say(&app, "c1", "rainbow").await;
    let body = say(&app, "c1", "rainbow").await;

    assert_eq!(texts(&body)[1], "Color cycle already enabled");
}
