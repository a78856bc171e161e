use std::collections::BTreeMap;

use kelpie_core::{Entity, EntityId, InteractionHistory, InteractionState, Point, time};

use crate::hash;
use crate::options::{LayoutOptions, Viewport};

/// Frequency at which `frequency_score` saturates.
const FREQUENCY_SCORE_FULL: f64 = 6.0;
/// Velocity (px/s) at which `velocity_score` saturates.
const VELOCITY_SCORE_FULL: f64 = 900.0;
/// Total engaged duration (ms) at which `hover_score` saturates.
const HOVER_SCORE_FULL_MS: f64 = 6_000.0;

/// Engagement threshold past which the center pull engages.
const CENTER_PULL_THRESHOLD: f64 = 0.5;

/// Ignored entities land at these fractions of the container dimension, on the side they were
/// already leaning toward.
const EDGE_FAR_FRACTION: f64 = 0.9;
const EDGE_NEAR_FRACTION: f64 = 0.1;

/// Normalized per-entity engagement signals, derived from the latest history snapshot.
///
/// The pass itself consumes `frequency_score` (center pull) and `ignored` (edge override);
/// `velocity_score` and `hover_score` are outbound data for renderer emphasis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementSignals {
    pub frequency_score: f64,
    pub velocity_score: f64,
    pub hover_score: f64,
    /// No interaction within the recency threshold and an empty frequency window.
    pub ignored: bool,
}

pub fn engagement_signals(
    history: &InteractionHistory,
    now: i64,
    ignore_after_ms: i64,
) -> EngagementSignals {
    EngagementSignals {
        frequency_score: (history.frequency as f64 / FREQUENCY_SCORE_FULL).min(1.0),
        velocity_score: (history.average_velocity / VELOCITY_SCORE_FULL).min(1.0),
        hover_score: (history.total_duration / HOVER_SCORE_FULL_MS).min(1.0),
        ignored: now - history.last_interaction_time > ignore_after_ms && history.frequency == 0,
    }
}

/// Output of one layout pass.
///
/// `targets` holds a new target for every non-exempt entity; recently dragged entities are
/// absent and keep their current target. `signals` covers the whole population.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub targets: BTreeMap<EntityId, Point>,
    pub signals: BTreeMap<EntityId, EngagementSignals>,
}

pub(crate) fn recalculate_pass(
    entities: &[Entity],
    opts: &LayoutOptions,
    viewport: Viewport,
) -> LayoutResult {
    let now = time::now_ms();
    let (cx, cy) = viewport.center();

    let mut targets = BTreeMap::new();
    let mut signals = BTreeMap::new();
    let mut exempt = 0usize;

    for (index, entity) in entities.iter().enumerate() {
        let sig = engagement_signals(&entity.interaction_history, now, opts.ignore_after_ms);
        signals.insert(entity.id.clone(), sig);

        if let Some(dragged_at) = entity.last_drag_time {
            if now - dragged_at < opts.drag_exemption_ms {
                exempt += 1;
                continue;
            }
        }

        let (mut x, mut y) =
            hash::base_target(entity.created_at, index, entity.id.index(), viewport, opts);

        if sig.frequency_score > CENTER_PULL_THRESHOLD {
            let pull = (sig.frequency_score - CENTER_PULL_THRESHOLD) * opts.center_pull_scale;
            x = pull_axis(x, cx, pull);
            y = pull_axis(y, cy, pull);
        }

        if sig.ignored {
            x = edge_override_axis(x, cx, viewport.width);
            y = edge_override_axis(y, cy, viewport.height);
        }

        for (j, other) in entities.iter().enumerate() {
            if j == index || !is_active(other) {
                continue;
            }
            let (px, py) = repulsion_push(
                x - other.target_position.x,
                y - other.target_position.y,
                opts.repulsion_radius,
                opts.repulsion_strength,
            );
            x += px;
            y += py;
        }

        let (dx, dy) = drift_offset(index, now, opts);
        x += dx;
        y += dy;

        targets.insert(
            entity.id.clone(),
            Point::new(
                x.clamp(opts.margin, viewport.width - opts.margin),
                y.clamp(opts.margin, viewport.height - opts.margin),
            ),
        );
    }

    tracing::debug!(
        entities = entities.len(),
        recomputed = targets.len(),
        exempt,
        "layout pass complete"
    );
    LayoutResult { targets, signals }
}

fn is_active(entity: &Entity) -> bool {
    entity.interaction_history.frequency > 0 || entity.interaction_state == InteractionState::Active
}

/// Blends `v` toward `center` by `pull` (0 = stay, 1 = land on center).
fn pull_axis(v: f64, center: f64, pull: f64) -> f64 {
    v + (center - v) * pull
}

/// Replaces an ignored entity's coordinate with the far-edge fraction of the dimension on the
/// side of the center it was already leaning toward.
fn edge_override_axis(v: f64, center: f64, dimension: f64) -> f64 {
    if v > center {
        dimension * EDGE_FAR_FRACTION
    } else {
        dimension * EDGE_NEAR_FRACTION
    }
}

/// Push along the separating axis, linear falloff from `strength` at distance 0 to nothing at
/// `radius`. Coincident points contribute nothing (guarded divide).
fn repulsion_push(dx: f64, dy: f64, radius: f64, strength: f64) -> (f64, f64) {
    let dist = dx.hypot(dy);
    if dist <= 0.0 || dist >= radius {
        return (0.0, 0.0);
    }
    let force = (radius - dist) / radius * strength;
    (dx / dist * force, dy / dist * force)
}

/// Per-entity sinusoidal offset: varied speed and amplitude by index, direction alternating
/// {+1, -1, +0.5} by `index % 3`.
fn drift_offset(index: usize, now: i64, opts: &LayoutOptions) -> (f64, f64) {
    let speed = opts.drift_base_speed + index as f64 * opts.drift_speed_step;
    let amplitude = opts.drift_base_amplitude + (index % 5) as f64 * opts.drift_amplitude_step;
    let direction = match index % 3 {
        0 => 1.0,
        1 => -1.0,
        _ => 0.5,
    };
    let phase = now as f64 * speed + index as f64;
    (
        phase.sin() * amplitude * direction,
        phase.cos() * amplitude * direction,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_saturate_at_one() {
        let history = InteractionHistory {
            frequency: 40,
            average_velocity: 5_000.0,
            total_duration: 100_000.0,
            last_interaction_time: 1_000,
            interaction_count: 40,
        };
        let sig = engagement_signals(&history, 2_000, 8_000);
        assert_eq!(sig.frequency_score, 1.0);
        assert_eq!(sig.velocity_score, 1.0);
        assert_eq!(sig.hover_score, 1.0);
        assert!(!sig.ignored);
    }

    #[test]
    fn ignored_requires_both_recency_and_an_empty_window() {
        let mut history = InteractionHistory {
            last_interaction_time: 0,
            ..Default::default()
        };
        assert!(engagement_signals(&history, 9_000, 8_000).ignored);
        // Recent touch: not ignored even with frequency 0 at the boundary.
        assert!(!engagement_signals(&history, 8_000, 8_000).ignored);
        // Stale but the window still holds events: not ignored.
        history.frequency = 1;
        assert!(!engagement_signals(&history, 9_000, 8_000).ignored);
    }

    #[test]
    fn center_pull_scales_with_engagement_above_the_threshold() {
        // frequency_score 1.0 gives the maximum 15% pull.
        let pulled = pull_axis(100.0, 500.0, (1.0 - 0.5) * 0.3);
        assert!((pulled - 160.0).abs() < 1e-12);
    }

    #[test]
    fn edge_override_tracks_the_leaning_side() {
        assert_eq!(edge_override_axis(700.0, 500.0, 1000.0), 900.0);
        assert_eq!(edge_override_axis(300.0, 500.0, 1000.0), 100.0);
    }

    #[test]
    fn repulsion_is_linear_in_proximity_and_guards_zero_distance() {
        // Half the radius apart: half strength, pushing along +x.
        let (px, py) = repulsion_push(90.0, 0.0, 180.0, 28.0);
        assert!((px - 14.0).abs() < 1e-12);
        assert_eq!(py, 0.0);

        assert_eq!(repulsion_push(0.0, 0.0, 180.0, 28.0), (0.0, 0.0));
        assert_eq!(repulsion_push(180.0, 0.0, 180.0, 28.0), (0.0, 0.0));
    }

    #[test]
    fn drift_amplitude_is_bounded_by_the_per_entity_amplitude() {
        let opts = LayoutOptions::default();
        for index in 0..20 {
            let bound = opts.drift_base_amplitude + (index % 5) as f64 * opts.drift_amplitude_step;
            for t in [0_i64, 1_000, 50_000, 1_000_000] {
                let (dx, dy) = drift_offset(index, t, &opts);
                assert!(dx.abs() <= bound + 1e-9);
                assert!(dy.abs() <= bound + 1e-9);
            }
        }
    }
}
