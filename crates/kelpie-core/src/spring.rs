use serde::{Deserialize, Serialize};

use crate::entities::{Entity, InteractionHistory};
use crate::time;

/// Desired animated-motion feel, consumed by the external spring animator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 15.0,
            mass: 1.0,
        }
    }
}

/// Near-instant settle used whenever reduced motion is requested.
pub const REDUCED_MOTION_SPRING: SpringConfig = SpringConfig {
    stiffness: 1000.0,
    damping: 100.0,
    mass: 1.0,
};

const STIFFNESS_RANGE: (f64, f64) = (20.0, 300.0);
const DAMPING_RANGE: (f64, f64) = (5.0, 30.0);
const MASS_RANGE: (f64, f64) = (0.5, 3.0);

/// Maps an entity's interaction history to spring parameters.
///
/// The rules are additive on the running values, applied in a fixed order; the two idle
/// overrides replace whatever accumulated before them, and reduced motion short-circuits
/// everything (accessibility takes precedence over adaptivity).
pub fn derive_spring(history: &InteractionHistory, reduced_motion: bool) -> SpringConfig {
    if reduced_motion {
        return REDUCED_MOTION_SPRING;
    }

    let SpringConfig {
        mut stiffness,
        mut damping,
        mut mass,
    } = SpringConfig::default();

    if history.frequency > 3 {
        let freq = history.frequency as f64;
        stiffness = 200.0 + freq * 20.0;
        damping = 20.0 + freq * 2.0;
        mass = 0.8;
    }
    if history.average_velocity > 500.0 {
        stiffness += 100.0;
        damping -= 5.0;
    }
    if history.total_duration > 5000.0 {
        damping += 2.0;
        mass += 0.2;
    }

    let idle = time::now_ms() - history.last_interaction_time;
    if idle > 5_000 && history.frequency == 0 {
        stiffness = 50.0;
        damping = 10.0;
        mass = 1.5;
    }
    if idle > 10_000 && history.frequency == 0 {
        stiffness = 30.0;
        damping = 8.0;
        mass = 2.0;
    }

    SpringConfig {
        stiffness: stiffness.clamp(STIFFNESS_RANGE.0, STIFFNESS_RANGE.1),
        damping: damping.clamp(DAMPING_RANGE.0, DAMPING_RANGE.1),
        mass: mass.clamp(MASS_RANGE.0, MASS_RANGE.1),
    }
}

/// Population-wide spring for whole-layout transitions: stiffer when the session as a whole is
/// busy (summed frequency or mean velocity high), baseline otherwise.
pub fn derive_layout_spring(entities: &[Entity], reduced_motion: bool) -> SpringConfig {
    if reduced_motion {
        return REDUCED_MOTION_SPRING;
    }

    let total_frequency: usize = entities
        .iter()
        .map(|e| e.interaction_history.frequency)
        .sum();
    let average_velocity = if entities.is_empty() {
        0.0
    } else {
        entities
            .iter()
            .map(|e| e.interaction_history.average_velocity)
            .sum::<f64>()
            / entities.len() as f64
    };

    if total_frequency > 10 || average_velocity > 300.0 {
        SpringConfig {
            stiffness: 150.0,
            damping: 20.0,
            mass: 1.0,
        }
    } else {
        SpringConfig::default()
    }
}
