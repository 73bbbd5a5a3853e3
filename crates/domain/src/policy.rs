//! Override policy: per light and per dimension, decide whether the engine
//! computes a target or stands aside.

use std::fmt;

use crate::light::{LightObservation, same_color_temp};
use crate::tracker::KnownState;

/// One independently automated attribute of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Color,
    Brightness,
}

impl Dimension {
    #[must_use]
    pub fn supported_by(self, observation: &LightObservation) -> bool {
        match self {
            Self::Color => observation.supports_color_temp(),
            Self::Brightness => observation.supports_brightness(),
        }
    }

    /// Whether the light still shows what the engine last committed.
    #[must_use]
    pub fn unchanged_since_commit(self, known: &KnownState, observation: &LightObservation) -> bool {
        match self {
            Self::Color => same_color_temp(known.color_temp, observation.color_temp),
            Self::Brightness => known.brightness == observation.brightness,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => f.write_str("color"),
            Self::Brightness => f.write_str("brightness"),
        }
    }
}

/// Outcome of [`decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The light lacks the capability; nothing to do.
    Unsupported,
    /// A third party changed the light since the last commit.
    Overridden,
    /// Compute a target and apply it if it differs.
    Compute,
}

/// Decide what to do with one dimension of one light.
///
/// Untracked lights (just turned on or newly seen) are claimed
/// unconditionally, as are tracked lights when `reclaim` is set (a mode was
/// just reactivated or pinned). Tracked lights are otherwise claimed only
/// while their live value still equals the last committed one.
#[must_use]
pub fn decide(
    dimension: Dimension,
    observation: &LightObservation,
    known: Option<&KnownState>,
    reclaim: bool,
) -> Decision {
    if !dimension.supported_by(observation) {
        return Decision::Unsupported;
    }
    match known {
        None => Decision::Compute,
        Some(_) if reclaim => Decision::Compute,
        Some(known) if dimension.unchanged_since_commit(known, observation) => Decision::Compute,
        Some(_) => Decision::Overridden,
    }
}
