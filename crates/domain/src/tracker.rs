//! State tracker: what the engine itself last committed to each light.
//!
//! An entry exists only while its light is observed on. Comparing an entry to
//! the light's live attributes tells the engine whether somebody else touched
//! the light since the last commit.

use std::collections::{HashMap, HashSet};

use crate::id::LightId;
use crate::light::{Brightness, ColorTemp, LightObservation};

/// Values last committed to one light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnownState {
    pub color_temp: Option<ColorTemp>,
    pub brightness: Option<Brightness>,
}

impl KnownState {
    /// Seed from a light's live attributes.
    #[must_use]
    pub fn observed(observation: &LightObservation) -> Self {
        Self {
            color_temp: observation.color_temp,
            brightness: observation.brightness,
        }
    }
}

/// The subset of dimensions actually changed by one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Change {
    pub color_temp: Option<ColorTemp>,
    pub brightness: Option<Brightness>,
}

impl Change {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color_temp.is_none() && self.brightness.is_none()
    }
}

/// Light id → [`KnownState`].
#[derive(Debug, Default)]
pub struct StateTracker {
    known: HashMap<LightId, KnownState>,
}

impl StateTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, light: &LightId) -> Option<&KnownState> {
        self.known.get(light)
    }

    #[must_use]
    pub fn is_tracked(&self, light: &LightId) -> bool {
        self.known.contains_key(light)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.known.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Drop every entry whose light is not in `on_lights`. Returns how many
    /// entries were removed.
    pub fn retain_on(&mut self, on_lights: &HashSet<LightId>) -> usize {
        let before = self.known.len();
        self.known.retain(|light, _| on_lights.contains(light));
        before - self.known.len()
    }

    /// Stop tracking `light`. Returns `false` if it was not tracked.
    pub fn forget(&mut self, light: &LightId) -> bool {
        self.known.remove(light).is_some()
    }

    /// Start tracking `light` from its observation unless already tracked.
    pub fn seed(&mut self, light: &LightId, observation: &LightObservation) {
        self.known
            .entry(light.clone())
            .or_insert_with(|| KnownState::observed(observation));
    }

    /// Record a successful command. Dimensions absent from `change` keep
    /// their prior entry, or the observed value for a newly tracked light.
    pub fn commit(&mut self, light: &LightId, observation: &LightObservation, change: Change) {
        let entry = self
            .known
            .entry(light.clone())
            .or_insert_with(|| KnownState::observed(observation));
        if let Some(color_temp) = change.color_temp {
            entry.color_temp = Some(color_temp);
        }
        if let Some(brightness) = change.brightness {
            entry.brightness = Some(brightness);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::Capability;

    fn observation(kelvin: u32, brightness: Brightness) -> LightObservation {
        LightObservation::builder()
            .color_temp(kelvin)
            .brightness(brightness)
            .capability(Capability::ColorTemp)
            .build()
    }

    #[test]
    fn should_start_empty() {
        let tracker = StateTracker::new();
        assert!(tracker.is_empty());
        assert!(!tracker.is_tracked(&LightId::new("light.a")));
    }

    #[test]
    fn should_seed_from_observation_once() {
        let mut tracker = StateTracker::new();
        let light = LightId::new("light.a");
        tracker.seed(&light, &observation(3000, 100));
        tracker.seed(&light, &observation(5000, 200));

        let known = tracker.get(&light).unwrap();
        assert_eq!(known.color_temp, Some(ColorTemp::from_kelvin(3000)));
        assert_eq!(known.brightness, Some(100));
    }

    #[test]
    fn should_commit_only_changed_dimensions() {
        let mut tracker = StateTracker::new();
        let light = LightId::new("light.a");
        tracker.seed(&light, &observation(3000, 100));

        tracker.commit(
            &light,
            &observation(3500, 150),
            Change {
                color_temp: Some(ColorTemp::from_kelvin(4375)),
                brightness: None,
            },
        );

        let known = tracker.get(&light).unwrap();
        assert_eq!(known.color_temp, Some(ColorTemp::from_kelvin(4375)));
        assert_eq!(known.brightness, Some(100));
    }

    #[test]
    fn should_seed_unchanged_dimensions_when_committing_new_light() {
        let mut tracker = StateTracker::new();
        let light = LightId::new("light.new");

        tracker.commit(
            &light,
            &observation(2700, 80),
            Change {
                color_temp: None,
                brightness: Some(254),
            },
        );

        let known = tracker.get(&light).unwrap();
        assert_eq!(known.color_temp, Some(ColorTemp::from_kelvin(2700)));
        assert_eq!(known.brightness, Some(254));
    }

    #[test]
    fn should_forget_lights_that_are_no_longer_on() {
        let mut tracker = StateTracker::new();
        let a = LightId::new("light.a");
        let b = LightId::new("light.b");
        tracker.seed(&a, &observation(3000, 100));
        tracker.seed(&b, &observation(3000, 100));

        let on: HashSet<LightId> = [a.clone()].into_iter().collect();
        assert_eq!(tracker.retain_on(&on), 1);
        assert!(tracker.is_tracked(&a));
        assert!(!tracker.is_tracked(&b));
    }

    #[test]
    fn should_forget_single_light() {
        let mut tracker = StateTracker::new();
        let light = LightId::new("light.a");
        tracker.seed(&light, &observation(3000, 100));

        assert!(tracker.forget(&light));
        assert!(!tracker.forget(&light));
        assert!(tracker.is_empty());
    }
}
