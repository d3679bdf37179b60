//! Entity slots — named values the NLU service extracted from a message.

use serde::{Deserialize, Serialize};

/// Slot carrying the target location (e.g. `"kitchen"`).
pub const SLOT_LOCATION: &str = "light";
/// Slot carrying a color name or hex code.
pub const SLOT_COLOR: &str = "color";
/// Slot carrying an effect name (e.g. `"cop mode"`, `"cycle"`).
pub const SLOT_EFFECT: &str = "effect";
/// Slot carrying whether an effect should be enabled or disabled.
pub const SLOT_EFFECT_STATE: &str = "effect_state";
/// Slot carrying an explicit power state (`"on"` / `"off"`).
pub const SLOT_STATE: &str = "state";

/// A single `(name, value, confidence)` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySlot {
    pub name: String,
    pub value: String,
    pub confidence: f64,
}

impl EntitySlot {
    /// Build a slot from its parts.
    pub fn new(name: impl Into<String>, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            confidence,
        }
    }
}

/// The slots of one recognition result, in the order the NLU returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slots(Vec<EntitySlot>);

impl Slots {
    /// First slot with the given name, if any.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&EntitySlot> {
        self.0.iter().find(|slot| slot.name == name)
    }

    /// Value of the first slot with the given name, if any.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.find(name).map(|slot| slot.value.as_str())
    }

    /// All slots with the given name.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a EntitySlot> + 'a {
        self.0.iter().filter(move |slot| slot.name == name)
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no slot was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<EntitySlot>> for Slots {
    fn from(slots: Vec<EntitySlot>) -> Self {
        Self(slots)
    }
}

impl FromIterator<EntitySlot> for Slots {
    fn from_iter<T: IntoIterator<Item = EntitySlot>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Slots {
    type Item = &'a EntitySlot;
    type IntoIter = std::slice::Iter<'a, EntitySlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots() -> Slots {
        Slots::from(vec![
            EntitySlot::new(SLOT_COLOR, "blue", 0.9),
            EntitySlot::new(SLOT_LOCATION, "kitchen", 0.8),
            EntitySlot::new(SLOT_COLOR, "red", 0.4),
        ])
    }

    #[test]
    fn should_find_first_slot_by_name() {
        let slots = slots();
        assert_eq!(slots.value(SLOT_COLOR), Some("blue"));
        assert_eq!(slots.value(SLOT_LOCATION), Some("kitchen"));
    }

    #[test]
    fn should_return_none_when_slot_missing() {
        assert!(slots().find(SLOT_EFFECT).is_none());
    }

    #[test]
    fn should_find_all_slots_with_name() {
        let slots = slots();
        let colors: Vec<&str> = slots
            .find_all(SLOT_COLOR)
            .map(|slot| slot.value.as_str())
            .collect();
        assert_eq!(colors, vec!["blue", "red"]);
    }

    #[test]
    fn should_serialize_as_plain_array() {
        let slots = Slots::from(vec![EntitySlot::new(SLOT_STATE, "on", 1.0)]);
        let json = serde_json::to_value(&slots).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"name": "state", "value": "on", "confidence": 1.0}])
        );
    }
}
