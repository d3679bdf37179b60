//! User-facing reply texts.

pub const GREETING: &str = "Sup, yo!";
pub const HELP: &str = "I can control the lights in your house. You can say things like, \"Turn the kitchen lights on\".";
pub const CANCEL: &str = "OK. Canceled.";
pub const LIGHTS_ACKNOWLEDGE: &str = "OK! One sec...";
pub const COMMAND_NOT_UNDERSTOOD: &str =
    "I did not understand that light command. Please double check the available commands and retry.";
pub const CYCLE_ENABLED: &str = "Color cycle enabled";
pub const CYCLE_ALREADY_ENABLED: &str = "Color cycle already enabled";
pub const CYCLE_DISABLED: &str = "Color cycle disabled";

#[must_use]
pub fn not_understood(text: &str) -> String {
    format!("Sorry, I did not understand '{text}'.")
}

/// Confirmation of a direct state change.
#[must_use]
pub fn state_changed(location: &str, power: &str, color: Option<&str>) -> String {
    match color {
        Some(color) => format!("The {location} was turned {power} and was set to {color}"),
        None => format!("The {location} was turned {power}"),
    }
}

#[must_use]
pub fn effect_started(effect: &str) -> String {
    format!("Successfully initiated \"{effect}\" effect")
}

#[must_use]
pub fn unsupported_effect(effect: &str) -> String {
    format!("Received an unsupported effect: {effect}")
}

#[must_use]
pub fn lighting_failed(error: &dyn std::fmt::Display) -> String {
    format!("There was an error initiating the effect: {error}")
}
