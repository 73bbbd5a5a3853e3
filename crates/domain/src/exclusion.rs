//! Lights exempt from every engine command.

use std::collections::BTreeSet;

use crate::id::LightId;

#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    lights: BTreeSet<LightId>,
}

impl ExclusionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `light` was already excluded.
    pub fn exclude(&mut self, light: LightId) -> bool {
        self.lights.insert(light)
    }

    /// Returns `false` if `light` was not excluded.
    pub fn release(&mut self, light: &LightId) -> bool {
        self.lights.remove(light)
    }

    #[must_use]
    pub fn contains(&self, light: &LightId) -> bool {
        self.lights.contains(light)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_exclude_and_release() {
        let mut set = ExclusionSet::new();
        let light = LightId::new("light.a");
        assert!(set.exclude(light.clone()));
        assert!(!set.exclude(light.clone()));
        assert!(set.contains(&light));

        assert!(set.release(&light));
        assert!(!set.release(&light));
        assert!(set.is_empty());
    }
}
